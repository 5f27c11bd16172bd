//! Nucléotides, séquences générées et leur provenance

use serde::{Deserialize, Serialize};
use std::fmt;

/// Les quatre nucléotides canoniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    /// Ordre canonique utilisé par les tables de tirage
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

    /// Ordre d'affichage des rapports
    pub const REPORT_ORDER: [Nucleotide; 4] =
        [Nucleotide::A, Nucleotide::T, Nucleotide::C, Nucleotide::G];

    /// Convertit un caractère en nucléotide (insensible à la casse)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    /// Convertit un nucléotide en caractère
    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }

    /// Index dans `Nucleotide::ALL`
    pub fn index(self) -> usize {
        match self {
            Nucleotide::A => 0,
            Nucleotide::C => 1,
            Nucleotide::G => 2,
            Nucleotide::T => 3,
        }
    }

    /// Les trois autres nucléotides, dans l'ordre canonique
    pub fn others(self) -> [Nucleotide; 3] {
        let mut out = [Nucleotide::A; 3];
        let mut i = 0;
        for n in Nucleotide::ALL {
            if n != self {
                out[i] = n;
                i += 1;
            }
        }
        out
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse une chaîne en nucléotides; renvoie le premier caractère invalide en cas d'échec
pub fn parse_bases(s: &str) -> std::result::Result<Vec<Nucleotide>, char> {
    s.chars()
        .map(|c| Nucleotide::from_char(c).ok_or(c))
        .collect()
}

/// Reconstruit une chaîne depuis des nucléotides
pub fn bases_to_string(bases: &[Nucleotide]) -> String {
    bases.iter().map(|b| b.as_char()).collect()
}

/// Comptage des bases, indexé comme `Nucleotide::ALL`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub counts: [usize; 4],
}

impl Composition {
    /// Compte les bases d'une séquence
    pub fn of(bases: &[Nucleotide]) -> Self {
        let mut comp = Self::default();
        comp.add(bases);
        comp
    }

    /// Compte les bases d'une chaîne; les caractères hors alphabet sont ignorés
    pub fn of_str(s: &str) -> Self {
        let mut comp = Self::default();
        for n in s.chars().filter_map(Nucleotide::from_char) {
            comp.counts[n.index()] += 1;
        }
        comp
    }

    pub fn add(&mut self, bases: &[Nucleotide]) {
        for b in bases {
            self.counts[b.index()] += 1;
        }
    }

    pub fn merge(&mut self, other: &Composition) {
        for (c, o) in self.counts.iter_mut().zip(other.counts.iter()) {
            *c += o;
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn count(&self, n: Nucleotide) -> usize {
        self.counts[n.index()]
    }

    /// Fréquence réalisée d'un nucléotide (0 pour une composition vide)
    pub fn fraction(&self, n: Nucleotide) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(n) as f64 / total as f64
    }

    /// Ratio GC (0-1)
    pub fn gc_ratio(&self) -> f64 {
        self.fraction(Nucleotide::G) + self.fraction(Nucleotide::C)
    }
}

/// Application d'un motif de répétition sur une séquence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatEvent {
    /// Index du RepeatSpec dans le lot
    pub spec_index: usize,
    pub pattern: String,
    /// Nombre de copies en tandem insérées
    pub copies: usize,
    /// Position d'insertion dans la séquence au moment de l'étape
    pub offset: usize,
}

/// Fragment d'un motif placé dans la séquence hôte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentPlacement {
    /// Position d'insertion dans la séquence au moment du placement
    pub offset: usize,
    /// Fragment avant mutation
    pub original: String,
    /// Fragment effectivement inséré
    pub inserted: String,
    /// Nombre de substitutions appliquées
    pub mutations: usize,
}

/// Application d'un InsertSpec sur une séquence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertEvent {
    /// Index de l'InsertSpec dans le lot
    pub spec_index: usize,
    /// Fragments dans l'ordre du motif
    pub fragments: Vec<FragmentPlacement>,
    /// Espacements tirés entre fragments consécutifs
    pub gaps: Vec<usize>,
    /// Nombre de coupes demandées mais impossibles (fragment trop court)
    pub clamped_cuts: usize,
}

impl InsertEvent {
    pub fn mutations(&self) -> usize {
        self.fragments.iter().map(|f| f.mutations).sum()
    }
}

/// Séquence produite par le moteur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSequence {
    /// `base_id` suivi de l'index complété par des zéros
    pub id: String,
    /// Séquence finale sur {A,C,G,T}
    pub sequence: String,
    /// Longueur produite par le constructeur de base, avant répétitions et insertions
    pub base_length: usize,
    pub repeats: Vec<RepeatEvent>,
    pub inserts: Vec<InsertEvent>,
}

impl GeneratedSequence {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn composition(&self) -> Composition {
        Composition::of_str(&self.sequence)
    }
}

impl fmt::Display for GeneratedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sequence)
    }
}
