//! Per-subject and overall weighted averages.

use crate::subject::{Catalog, SubjectId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Averages at or above this mark pass.
pub const PASS_THRESHOLD: f64 = 10.0;

const EXAM_WEIGHT: f64 = 0.6;
const CC_WEIGHT: f64 = 0.4;
const CC_WEIGHT_WITH_TP: f64 = 0.2;
const TP_WEIGHT: f64 = 0.2;

/// Coerces raw input text to a score. Blank or non-numeric text counts as 0.
pub fn parse_score(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
        .unwrap_or(0.0)
}

// ------ ScoreEntry ------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Component {
    Exam,
    Cc,
    Tp,
}

/// Raw text typed into one subject's row.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub exam: String,
    pub cc: String,
    pub tp: String,
}

impl ScoreEntry {
    pub fn new(exam: &str, cc: &str, tp: &str) -> Self {
        ScoreEntry {
            exam: exam.into(),
            cc: cc.into(),
            tp: tp.into(),
        }
    }

    pub fn field(&self, component: Component) -> &str {
        match component {
            Component::Exam => &self.exam,
            Component::Cc => &self.cc,
            Component::Tp => &self.tp,
        }
    }

    pub fn set(&mut self, component: Component, text: String) {
        match component {
            Component::Exam => self.exam = text,
            Component::Cc => self.cc = text,
            Component::Tp => self.tp = text,
        }
    }

    pub fn is_blank(&self) -> bool {
        [&self.exam, &self.cc, &self.tp]
            .iter()
            .all(|text| text.trim().is_empty())
    }

    pub fn average(&self, has_tp: bool) -> f64 {
        let exam = parse_score(&self.exam);
        let cc = parse_score(&self.cc);
        if has_tp {
            exam * EXAM_WEIGHT + cc * CC_WEIGHT_WITH_TP + parse_score(&self.tp) * TP_WEIGHT
        } else {
            exam * EXAM_WEIGHT + cc * CC_WEIGHT
        }
    }
}

// ------ Scores ------

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Scores {
    entries: IndexMap<SubjectId, ScoreEntry>,
}

impl Scores {
    pub fn new() -> Self {
        Scores::default()
    }

    pub fn get(&self, id: SubjectId) -> Option<&ScoreEntry> {
        self.entries.get(&id)
    }

    pub fn field(&self, id: SubjectId, component: Component) -> &str {
        self.get(id).map_or("", |entry| entry.field(component))
    }

    /// Blank entries are dropped, so a blanked row compares equal to one that
    /// was never typed into.
    pub fn insert(&mut self, id: SubjectId, entry: ScoreEntry) {
        if entry.is_blank() {
            self.entries.shift_remove(&id);
        } else {
            self.entries.insert(id, entry);
        }
    }

    pub fn set(&mut self, id: SubjectId, component: Component, text: String) {
        let mut entry = self.entries.get(&id).cloned().unwrap_or_default();
        entry.set(component, text);
        self.insert(id, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ------ Average ------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn css_class(self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Average(pub f64);

impl Average {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn outcome(self) -> Outcome {
        if self.0 >= PASS_THRESHOLD {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ------ Report ------

#[derive(Clone, Debug, PartialEq)]
pub struct SubjectAverage {
    pub id: SubjectId,
    pub average: Average,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub subjects: Vec<SubjectAverage>,
    /// `None` when the catalog carries no weight at all.
    pub overall: Option<Average>,
}

impl Report {
    pub fn average_of(&self, id: SubjectId) -> Option<Average> {
        self.subjects
            .iter()
            .find(|subject| subject.id == id)
            .map(|subject| subject.average)
    }
}

pub fn compute_averages(catalog: &Catalog, scores: &Scores) -> Report {
    let blank = ScoreEntry::default();
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    let subjects = catalog
        .iter()
        .map(|subject| {
            let average = scores.get(subject.id).unwrap_or(&blank).average(subject.has_tp);
            let weight = subject.effective_coefficient();
            weighted_sum += average * weight;
            total_weight += weight;
            SubjectAverage {
                id: subject.id,
                average: Average(average),
            }
        })
        .collect();

    let overall = if total_weight > 0.0 {
        Some(Average(weighted_sum / total_weight))
    } else {
        None
    };

    Report { subjects, overall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{Preset, Subject};

    const EPSILON: f64 = 1e-9;

    fn uniform_scores(catalog: &Catalog, exam: &str, cc: &str, tp: &str) -> Scores {
        let mut scores = Scores::new();
        for subject in catalog.iter() {
            let tp = if subject.has_tp { tp } else { "" };
            scores.insert(subject.id, ScoreEntry::new(exam, cc, tp));
        }
        scores
    }

    #[test]
    fn tens_average_to_ten_with_and_without_tp() {
        let catalog = Catalog::default();
        let report = compute_averages(&catalog, &uniform_scores(&catalog, "10", "10", "10"));
        for subject in &report.subjects {
            assert!((subject.average.value() - 10.0).abs() < EPSILON);
            assert_eq!(subject.average.to_string(), "10.00");
            assert_eq!(subject.average.outcome(), Outcome::Pass);
        }
    }

    #[test]
    fn blank_and_garbage_inputs_count_as_zero() {
        assert_eq!(parse_score(""), 0.0);
        assert_eq!(parse_score("   "), 0.0);
        assert_eq!(parse_score("abc"), 0.0);
        assert_eq!(parse_score("NaN"), 0.0);
        assert_eq!(parse_score("inf"), 0.0);
        assert_eq!(parse_score(" 12.5 "), 12.5);

        let catalog = Catalog::default();
        let missing = compute_averages(&catalog, &Scores::new());
        let zeros = compute_averages(&catalog, &uniform_scores(&catalog, "0", "0", "0"));
        let garbage = compute_averages(&catalog, &uniform_scores(&catalog, "x", "", "?"));
        assert_eq!(missing, zeros);
        assert_eq!(missing, garbage);
        assert_eq!(missing.overall, Some(Average(0.0)));
        assert_eq!(missing.overall.map(Average::outcome), Some(Outcome::Fail));
    }

    #[test]
    fn mixed_scores_end_to_end() {
        let catalog = Catalog::default();
        let report = compute_averages(&catalog, &uniform_scores(&catalog, "12", "8", "16"));

        let chemistry = report.average_of(SubjectId::Chemistry).unwrap();
        assert!((chemistry.value() - 12.0).abs() < EPSILON);
        let english = report.average_of(SubjectId::English).unwrap();
        assert!((english.value() - 10.4).abs() < EPSILON);

        // TP subjects weigh 13 at 12.0, the rest weigh 17 at 10.4.
        let overall = report.overall.unwrap();
        assert!((overall.value() - 332.8 / 30.0).abs() < EPSILON);
        assert_eq!(overall.to_string(), "11.09");
        assert_eq!(overall.outcome(), Outcome::Pass);
    }

    #[test]
    fn tp_text_is_ignored_for_subjects_without_tp() {
        let catalog = Catalog::default();
        let mut scores = Scores::new();
        scores.insert(SubjectId::English, ScoreEntry::new("10", "10", "20"));
        let report = compute_averages(&catalog, &scores);
        assert_eq!(report.average_of(SubjectId::English), Some(Average(10.0)));
    }

    #[test]
    fn presets_shift_the_overall_weighting() {
        let mut catalog = Catalog::default();
        let mut scores = Scores::new();
        scores.insert(SubjectId::Analysis, ScoreEntry::new("20", "20", ""));

        let before = compute_averages(&catalog, &scores).overall.unwrap();
        assert!((before.value() - 20.0 * 4.0 / 30.0).abs() < EPSILON);

        catalog.apply_preset(Preset::S4);
        let after = compute_averages(&catalog, &scores).overall.unwrap();
        assert!((after.value() - 20.0 * 3.0 / 30.0).abs() < EPSILON);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(Average(PASS_THRESHOLD).outcome(), Outcome::Pass);
        assert_eq!(Average(9.999).outcome(), Outcome::Fail);
        assert_eq!(Outcome::Pass.css_class(), "pass");
    }

    #[test]
    fn empty_catalog_has_no_overall_average() {
        let report = compute_averages(&Catalog::from_subjects(Vec::new()), &Scores::new());
        assert!(report.subjects.is_empty());
        assert_eq!(report.overall, None);
    }

    #[test]
    fn corrupted_coefficient_weighs_as_default() {
        let mut physics = Subject::new(SubjectId::Physics);
        physics.coefficient = f64::NAN;
        let catalog = Catalog::from_subjects(vec![physics, Subject::new(SubjectId::English)]);
        let mut scores = Scores::new();
        scores.insert(SubjectId::Physics, ScoreEntry::new("15", "15", "15"));

        let overall = compute_averages(&catalog, &scores).overall.unwrap();
        assert!((overall.value() - 15.0 * 4.0 / 5.0).abs() < EPSILON);
    }

    #[test]
    fn setting_a_field_creates_the_entry() {
        let mut scores = Scores::new();
        assert_eq!(scores.field(SubjectId::Physics, Component::Tp), "");
        scores.set(SubjectId::Physics, Component::Tp, "14".into());
        assert_eq!(scores.field(SubjectId::Physics, Component::Tp), "14");
        assert!(!scores.get(SubjectId::Physics).unwrap().is_blank());
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn blanking_every_field_drops_the_entry() {
        let mut scores = Scores::new();
        scores.set(SubjectId::Analysis, Component::Exam, "12".into());
        scores.set(SubjectId::Analysis, Component::Exam, "".into());
        assert!(scores.is_empty());
        assert_eq!(scores, Scores::new());

        scores.insert(SubjectId::Physics, ScoreEntry::new("", " ", ""));
        assert!(scores.get(SubjectId::Physics).is_none());
    }
}
