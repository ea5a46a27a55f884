use crate::locale::Locale;
use serde::{Deserialize, Serialize};

// ------ SubjectId ------

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectId {
    Analysis,
    Chemistry,
    ComputerScience,
    English,
    FluidMechanic,
    French,
    GeneralElectric,
    Engineering,
    NumericalAnalysis,
    Physics,
    RationalMechanic,
}

impl SubjectId {
    /// Canonical catalog order.
    pub const ALL: [SubjectId; 11] = [
        SubjectId::Analysis,
        SubjectId::Chemistry,
        SubjectId::ComputerScience,
        SubjectId::English,
        SubjectId::FluidMechanic,
        SubjectId::French,
        SubjectId::GeneralElectric,
        SubjectId::Engineering,
        SubjectId::NumericalAnalysis,
        SubjectId::Physics,
        SubjectId::RationalMechanic,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SubjectId::Analysis => "analysis",
            SubjectId::Chemistry => "chemistry",
            SubjectId::ComputerScience => "computer-science",
            SubjectId::English => "english",
            SubjectId::FluidMechanic => "fluid-mechanic",
            SubjectId::French => "french",
            SubjectId::GeneralElectric => "general-electric",
            SubjectId::Engineering => "engineering",
            SubjectId::NumericalAnalysis => "numerical-analysis",
            SubjectId::Physics => "physics",
            SubjectId::RationalMechanic => "rational-mechanic",
        }
    }

    pub fn from_key(key: &str) -> Option<SubjectId> {
        SubjectId::ALL.iter().copied().find(|id| id.key() == key)
    }

    /// (coefficient, has_tp)
    fn defaults(self) -> (f64, bool) {
        match self {
            SubjectId::Analysis => (4.0, false),
            SubjectId::Chemistry => (3.0, true),
            SubjectId::ComputerScience => (3.0, false),
            SubjectId::English => (1.0, false),
            SubjectId::FluidMechanic => (3.0, true),
            SubjectId::French => (1.0, false),
            SubjectId::GeneralElectric => (3.0, true),
            SubjectId::Engineering => (3.0, false),
            SubjectId::NumericalAnalysis => (2.0, false),
            SubjectId::Physics => (4.0, true),
            SubjectId::RationalMechanic => (3.0, false),
        }
    }

    pub fn default_coefficient(self) -> f64 {
        self.defaults().0
    }

    pub fn name(self, locale: Locale) -> &'static str {
        use Locale::*;
        use SubjectId::*;
        match (self, locale) {
            (Analysis, En) => "Analysis",
            (Analysis, Fr) => "Analyse",
            (Analysis, Ar) => "تحليل",
            (Chemistry, En) => "Chemistry",
            (Chemistry, Fr) => "Chimie",
            (Chemistry, Ar) => "كيمياء",
            (ComputerScience, En) => "Computer Science",
            (ComputerScience, Fr) => "Informatique",
            (ComputerScience, Ar) => "علوم الحاسوب",
            (English, En) => "English",
            (English, Fr) => "Anglais",
            (English, Ar) => "انجليزية",
            (FluidMechanic, En) => "Fluid Mechanic",
            (FluidMechanic, Fr) => "Mécanique des Fluides",
            (FluidMechanic, Ar) => "ميكانيك الموائع",
            (French, En) => "French",
            (French, Fr) => "Français",
            (French, Ar) => "فرنسية",
            (GeneralElectric, En) => "General Electric",
            (GeneralElectric, Fr) => "Électricité Générale",
            (GeneralElectric, Ar) => "كهرباء عامة",
            (Engineering, En) => "Engineering",
            (Engineering, Fr) => "Génie",
            (Engineering, Ar) => "هندسة",
            (NumericalAnalysis, En) => "Numerical Analysis",
            (NumericalAnalysis, Fr) => "Analyse Numérique",
            (NumericalAnalysis, Ar) => "تحليل عددي",
            (Physics, En) => "Physics",
            (Physics, Fr) => "Physique",
            (Physics, Ar) => "فيزياء",
            (RationalMechanic, En) => "Rational Mechanic",
            (RationalMechanic, Fr) => "Mécanique Rationnelle",
            (RationalMechanic, Ar) => "ميكانيك نظري",
        }
    }
}

// ------ Subject ------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: SubjectId,
    pub coefficient: f64,
    pub has_tp: bool,
}

impl Subject {
    pub fn new(id: SubjectId) -> Self {
        let (coefficient, has_tp) = id.defaults();
        Subject {
            id,
            coefficient,
            has_tp,
        }
    }

    /// The coefficient used for weighting. A corrupted value (NaN, infinite,
    /// zero or negative) is replaced by the subject's default.
    pub fn effective_coefficient(&self) -> f64 {
        if is_valid_coefficient(self.coefficient) {
            self.coefficient
        } else {
            self.id.default_coefficient()
        }
    }
}

pub fn is_valid_coefficient(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// ------ Preset ------

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    S3,
    S4,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::S3, Preset::S4];

    pub fn name(self) -> &'static str {
        match self {
            Preset::S3 => "S3",
            Preset::S4 => "S4",
        }
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Coefficients the preset assigns. Analysis and Numerical Analysis sit at
    /// catalog positions 0 and 8.
    fn assignments(self) -> [(SubjectId, f64); 2] {
        match self {
            Preset::S3 => [
                (SubjectId::Analysis, 4.0),
                (SubjectId::NumericalAnalysis, 2.0),
            ],
            Preset::S4 => [
                (SubjectId::Analysis, 3.0),
                (SubjectId::NumericalAnalysis, 3.0),
            ],
        }
    }
}

// ------ Catalog ------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            subjects: SubjectId::ALL.iter().copied().map(Subject::new).collect(),
        }
    }
}

pub fn default_catalog() -> Catalog {
    Catalog::default()
}

impl Catalog {
    pub fn from_subjects(subjects: Vec<Subject>) -> Self {
        Catalog { subjects }
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn at(&self, position: usize) -> Option<&Subject> {
        self.subjects.get(position)
    }

    pub fn position(&self, id: SubjectId) -> Option<usize> {
        self.subjects.iter().position(|subject| subject.id == id)
    }

    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    pub fn get_mut(&mut self, id: SubjectId) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|subject| subject.id == id)
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        for (id, coefficient) in preset.assignments().iter().copied() {
            if let Some(subject) = self.get_mut(id) {
                subject.coefficient = coefficient;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Catalog::default();
    }
}
