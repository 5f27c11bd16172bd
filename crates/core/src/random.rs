//! Source aléatoire déterministe
//!
//! Toutes les décisions stochastiques du moteur passent par une unique
//! [`RandomSource`] possédée par le run. Avec un seed explicite, le même ordre
//! de consommation produit exactement les mêmes tirages.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Flux de tirages seedé, propre à un run
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: u64,
    self_seeded: bool,
}

impl RandomSource {
    /// Crée une source depuis un seed explicite
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            self_seeded: false,
        }
    }

    /// Crée une source seedée depuis l'entropie système; le seed tiré reste consultable
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self {
            self_seeded: true,
            ..Self::from_seed(seed)
        }
    }

    /// Seed explicite si fourni, entropie système sinon
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Seed effectivement utilisé
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Vrai si le seed a été tiré depuis l'entropie système
    pub fn is_self_seeded(&self) -> bool {
        self.self_seeded
    }

    /// Flottant uniforme dans [0, 1)
    pub fn draw_float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Entier uniforme dans [lo, hi] (bornes incluses).
    ///
    /// Travaille en `u64` pour que le flux ne dépende pas de la largeur de
    /// `usize`. Un intervalle réduit à un point ne consomme aucun tirage.
    pub fn draw_int(&mut self, lo: u64, hi: u64) -> u64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Variante `usize` de [`draw_int`](Self::draw_int)
    pub fn draw_index(&mut self, lo: usize, hi: usize) -> usize {
        self.draw_int(lo as u64, hi as u64) as usize
    }

    /// Tirage selon une loi normale N(mean, sd)
    pub fn draw_normal(&mut self, mean: f64, sd: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + sd * z
    }

    /// Choix pondéré par table cumulative, en un seul tirage.
    ///
    /// `cumulative` est croissante; les entrées de poids nul (borne égale à la
    /// précédente) ne sont jamais choisies. Renvoie `None` si la table est vide
    /// ou de poids total nul.
    pub fn draw_choice(&mut self, cumulative: &[f64]) -> Option<usize> {
        let total = *cumulative.last()?;
        if total <= 0.0 {
            return None;
        }
        let u = self.draw_float() * total;
        cumulative
            .iter()
            .position(|&bound| u < bound)
            .or_else(|| last_positive_step(cumulative))
    }
}

/// Dernier index dont la borne dépasse la précédente (arrondi flottant sur `u`)
fn last_positive_step(cumulative: &[f64]) -> Option<usize> {
    (0..cumulative.len()).rev().find(|&i| {
        let prev = if i == 0 { 0.0 } else { cumulative[i - 1] };
        cumulative[i] > prev
    })
}
