#![allow(clippy::wildcard_imports)]

use seed::{prelude::*, *};

// Console logging only works inside a browser; natively the messages are
// formatted and dropped.
#[cfg(target_arch = "wasm32")]
macro_rules! console_log {
    ($($arg:tt)*) => { ::web_sys::console::log_1(&format!($($arg)*).into()) };
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_log {
    ($($arg:tt)*) => {{ let _ = format!($($arg)*); }};
}

#[cfg(target_arch = "wasm32")]
macro_rules! console_error {
    ($($arg:tt)*) => { ::web_sys::console::error_1(&format!($($arg)*).into()) };
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_error {
    ($($arg:tt)*) => {{ let _ = format!($($arg)*); }};
}

pub mod error;
pub mod locale;
pub mod scoring;
pub mod storage;
pub mod subject;

use locale::{LabelSet, Locale};
use scoring::{compute_averages, Average, Component, Report, Scores};
use storage::{BrowserStore, KeyValueStore, MemoryStore};
use subject::{Catalog, Preset, Subject, SubjectId};

const APP_ROOT: &str = "app";
const LANG_PARAM: &str = "lang";

// ------ ------
//     Model
// ------ ------

struct Model {
    catalog: Catalog,
    scores: Scores,
    locale: Locale,
    report: Option<Report>,
    store: Box<dyn KeyValueStore>,
}

impl Model {
    fn new(store: Box<dyn KeyValueStore>, locale: Locale) -> Self {
        let mut catalog = Catalog::default();
        let scores = storage::load(store.as_ref(), &mut catalog);
        Model {
            catalog,
            scores,
            locale,
            report: None,
            store,
        }
    }

    fn select_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    fn change_score(&mut self, id: SubjectId, component: Component, text: String) {
        self.scores.set(id, component, text);
        self.persist();
    }

    fn calculate(&mut self) {
        self.report = Some(compute_averages(&self.catalog, &self.scores));
    }

    fn reset(&mut self) {
        if let Err(err) = storage::clear(self.store.as_mut()) {
            console_error!("{}", err);
        }
        self.catalog.reset();
        self.scores.clear();
        self.report = None;
    }

    fn select_preset(&mut self, preset: Preset) {
        self.catalog.apply_preset(preset);
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = storage::save(self.store.as_mut(), &self.catalog, &self.scores) {
            console_error!("{}", err);
        }
    }
}

// ------ ------
//     Init
// ------ ------

fn init(url: Url, _: &mut impl Orders<Msg>) -> Model {
    let store: Box<dyn KeyValueStore> = match BrowserStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            console_error!("{}, scores will not outlive this page", err);
            Box::new(MemoryStore::new())
        }
    };

    let locale = url
        .search()
        .get(LANG_PARAM)
        .and_then(|codes| codes.first())
        .map_or_else(Locale::default, |code| Locale::resolve(code));

    Model::new(store, locale)
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    LocaleSelected(Locale),
    ScoreChanged(SubjectId, Component, String),
    Calculate,
    Reset,
    PresetSelected(Preset),
}

fn update(msg: Msg, model: &mut Model, _: &mut impl Orders<Msg>) {
    match msg {
        Msg::LocaleSelected(locale) => model.select_locale(locale),
        Msg::ScoreChanged(id, component, text) => model.change_score(id, component, text),
        Msg::Calculate => model.calculate(),
        Msg::Reset => model.reset(),
        Msg::PresetSelected(preset) => model.select_preset(preset),
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> Node<Msg> {
    let labels = model.locale.labels();
    div![
        C!["calculator"],
        attrs! {
            At::Lang => model.locale.code(),
            At::Dir => model.locale.direction(),
        },
        view_locales(model.locale),
        header![h1![labels.page_title], p![labels.page_subtitle]],
        view_presets(labels),
        view_subjects(model, labels),
        div![
            C!["actions"],
            button![
                id!("calcButton"),
                labels.calculate_button,
                ev(Ev::Click, |_| Msg::Calculate)
            ],
            button![
                id!("resetButton"),
                labels.reset_button,
                ev(Ev::Click, |_| Msg::Reset)
            ],
        ],
        match &model.report {
            Some(report) => view_report(report, model.locale),
            None => empty![],
        },
    ]
}

// ------ header ------

fn view_locales(current: Locale) -> Node<Msg> {
    ul![
        C!["lang-list"],
        Locale::ALL.iter().copied().map(|locale| {
            li![
                C!["lang-item", IF!(locale == current => "active")],
                locale.native_name(),
                ev(Ev::Click, move |_| Msg::LocaleSelected(locale)),
            ]
        })
    ]
}

fn view_presets(labels: &LabelSet) -> Node<Msg> {
    div![
        C!["presets"],
        Preset::ALL.iter().copied().map(|preset| {
            button![
                C!["preset"],
                format!("{} {}", labels.preset_button, preset.name()),
                ev(Ev::Click, move |_| Msg::PresetSelected(preset)),
            ]
        })
    ]
}

// ------ subjects ------

fn view_subjects(model: &Model, labels: &LabelSet) -> Node<Msg> {
    table![
        C!["subjects"],
        thead![tr![
            th![labels.subject_header],
            th![labels.coefficient_header],
            th![labels.exam_header],
            th![labels.cc_header],
            th![labels.tp_header],
        ]],
        tbody![model
            .catalog
            .iter()
            .map(|subject| view_subject(subject, &model.scores, model.locale))],
    ]
}

fn view_subject(subject: &Subject, scores: &Scores, locale: Locale) -> Node<Msg> {
    let id = subject.id;
    tr![
        td![id.name(locale)],
        td![subject.effective_coefficient().to_string()],
        td![view_score_input(id, Component::Exam, scores)],
        td![view_score_input(id, Component::Cc, scores)],
        td![if subject.has_tp {
            view_score_input(id, Component::Tp, scores)
        } else {
            span![C!["not-applicable"], locale.labels().not_applicable]
        }],
    ]
}

fn view_score_input(id: SubjectId, component: Component, scores: &Scores) -> Node<Msg> {
    input![
        C!["form-control"],
        attrs! {
            At::Type => "number",
            At::Step => "0.01",
            At::Value => scores.field(id, component),
        },
        input_ev(Ev::Input, move |text| Msg::ScoreChanged(id, component, text)),
    ]
}

// ------ results ------

fn view_report(report: &Report, locale: Locale) -> Node<Msg> {
    let labels = locale.labels();
    div![
        C!["results"],
        h3![labels.results_title],
        ul![report.subjects.iter().map(|subject| {
            li![
                format!("{}: ", subject.id.name(locale)),
                view_average(subject.average),
            ]
        })],
        h3![
            labels.overall_title,
            " ",
            match report.overall {
                Some(overall) => view_average(overall),
                None => span![C!["fail"], labels.no_weighted_subjects],
            },
        ],
    ]
}

fn view_average(average: Average) -> Node<Msg> {
    span![C![average.outcome().css_class()], average.to_string()]
}

// ------ ------
//     Start
// ------ ------

#[cfg(not(test))]
#[wasm_bindgen(start)]
pub fn start() {
    App::start(APP_ROOT, init, update, view);
}
