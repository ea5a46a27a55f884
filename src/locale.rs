use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    Ar,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Fr, Locale::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        let code = code.trim();
        Locale::ALL
            .iter()
            .copied()
            .find(|locale| locale.code().eq_ignore_ascii_case(code))
    }

    /// Like `from_code`, but unknown codes fall back to the default locale.
    pub fn resolve(code: &str) -> Locale {
        Locale::from_code(code).unwrap_or_else(|| {
            let fallback = Locale::default();
            console_log!("unknown locale `{}`, using `{}`", code, fallback.code());
            fallback
        })
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fr => "Français",
            Locale::Ar => "العربية",
        }
    }

    pub fn direction(self) -> &'static str {
        match self {
            Locale::Ar => "rtl",
            _ => "ltr",
        }
    }

    pub fn labels(self) -> &'static LabelSet {
        match self {
            Locale::En => &EN,
            Locale::Fr => &FR,
            Locale::Ar => &AR,
        }
    }
}

pub fn lookup(code: &str) -> &'static LabelSet {
    Locale::resolve(code).labels()
}

// ------ LabelSet ------

#[derive(Debug, PartialEq)]
pub struct LabelSet {
    pub page_title: &'static str,
    pub page_subtitle: &'static str,
    pub subject_header: &'static str,
    pub coefficient_header: &'static str,
    pub exam_header: &'static str,
    pub cc_header: &'static str,
    pub tp_header: &'static str,
    pub calculate_button: &'static str,
    pub reset_button: &'static str,
    pub preset_button: &'static str,
    pub results_title: &'static str,
    pub overall_title: &'static str,
    pub not_applicable: &'static str,
    pub no_weighted_subjects: &'static str,
}

static EN: LabelSet = LabelSet {
    page_title: "Exam Average Calculator",
    page_subtitle: "Calculate your exam average easily!",
    subject_header: "Subject",
    coefficient_header: "Coefficient",
    exam_header: "Exam Score",
    cc_header: "CC Score",
    tp_header: "TP Score (if applicable)",
    calculate_button: "Calculate Average",
    reset_button: "Reset",
    preset_button: "Coefficients",
    results_title: "Subject Averages:",
    overall_title: "Overall Average:",
    not_applicable: "N/A",
    no_weighted_subjects: "No weighted subjects",
};

static FR: LabelSet = LabelSet {
    page_title: "Calculateur de Moyenne d'Examen",
    page_subtitle: "Calculez facilement votre moyenne d'examen !",
    subject_header: "Matière",
    coefficient_header: "Coefficient",
    exam_header: "Note d'Examen",
    cc_header: "Note de CC",
    tp_header: "Note de TP (si applicable)",
    calculate_button: "Calculer la Moyenne",
    reset_button: "Réinitialiser",
    preset_button: "Coefficients",
    results_title: "Moyennes par Matière :",
    overall_title: "Moyenne Générale :",
    not_applicable: "N/A",
    no_weighted_subjects: "Aucune matière pondérée",
};

static AR: LabelSet = LabelSet {
    page_title: "حاسبة معدل الامتحان",
    page_subtitle: "احسب معدلك بسهولة!",
    subject_header: "المادة",
    coefficient_header: "المعامل",
    exam_header: "درجة الامتحان",
    cc_header: "درجة التكوين",
    tp_header: "درجة التدريب (إن وجد)",
    calculate_button: "احسب المعدل",
    reset_button: "إعادة تعيين",
    preset_button: "المعاملات",
    results_title: "المعدلات حسب المادة:",
    overall_title: "المعدل العام:",
    not_applicable: "غير متوفر",
    no_weighted_subjects: "لا توجد مواد موزونة",
};
