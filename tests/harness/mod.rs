use glob::glob;
use serde_derive::Deserialize;
use std::fs::File;
use std::io::BufReader;
use tagdispatch::{Attributes, DiagnosticLog, Dispatcher, StateNode};

pub type Log = Vec<String>;

/// Node of the registered tree. Every present handler label makes the node
/// record the corresponding event into the log.
#[derive(Deserialize, Debug)]
pub struct NodeFixture {
    pub tag: String,
    #[serde(default)]
    pub on_start: Option<String>,
    #[serde(default)]
    pub on_end: Option<String>,
    #[serde(default)]
    pub on_text: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeFixture>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TestEvent {
    Start(String),
    StartWith(String, Vec<(String, String)>),
    End(String),
    Text(String),
}

#[derive(Deserialize, Debug)]
pub struct Scenario {
    pub description: String,
    pub tree: Vec<NodeFixture>,
    pub events: Vec<TestEvent>,
    pub expected_log: Vec<String>,
    #[serde(default)]
    pub expected_diagnostics: Vec<String>,
    #[serde(default)]
    pub expected_open_path: Vec<String>,
}

pub struct Outcome {
    pub log: Log,
    pub diagnostics: Vec<String>,
    pub open_path: Vec<String>,
    pub depth_never_below_root: bool,
}

fn format_attributes(label: &str, attrs: &Attributes<'_>) -> String {
    attrs.iter().fold(label.to_string(), |mut entry, attr| {
        entry.push_str(&format!(" {}={}", attr.name(), attr.value()));
        entry
    })
}

pub fn build_node(fixture: &NodeFixture) -> StateNode<'static, Log> {
    let mut node = StateNode::new(fixture.tag.clone());

    if let Some(label) = fixture.on_start.clone() {
        node = node.on_start(move |log: &mut Log, attrs| log.push(format_attributes(&label, attrs)));
    }

    if let Some(label) = fixture.on_end.clone() {
        node = node.on_end(move |log: &mut Log| log.push(label.clone()));
    }

    if let Some(prefix) = fixture.on_text.clone() {
        node = node.on_text(move |log: &mut Log, text| {
            log.push(format!("{}{}", prefix, text.as_str()))
        });
    }

    for child in &fixture.children {
        node.add_child(build_node(child));
    }

    node
}

pub fn run(scenario: &Scenario) -> Outcome {
    let diagnostics = DiagnosticLog::new();
    let mut dispatcher =
        Dispatcher::with_context(Log::new()).with_diagnostic_sink(diagnostics.clone());
    let mut depth_never_below_root = true;

    for node in &scenario.tree {
        dispatcher.register_top_level(build_node(node));
    }

    for event in &scenario.events {
        match event {
            TestEvent::Start(tag) => dispatcher.handle_start(tag, &Attributes::default()),
            TestEvent::StartWith(tag, attrs) => {
                let attrs = attrs
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect();

                dispatcher.handle_start(tag, &attrs);
            }
            TestEvent::End(tag) => dispatcher.handle_end(tag),
            TestEvent::Text(text) => dispatcher.handle_text(text.as_bytes()),
        }

        depth_never_below_root &= dispatcher.depth() >= 1;
    }

    let open_path = dispatcher.open_path().map(String::from).collect();

    Outcome {
        log: dispatcher.into_context(),
        diagnostics: diagnostics.to_vec().iter().map(ToString::to_string).collect(),
        open_path,
        depth_never_below_root,
    }
}

pub fn load_scenarios() -> Vec<Scenario> {
    glob("tests/data/*.json")
        .unwrap()
        .map(|path| {
            let path = path.unwrap();
            let reader = BufReader::new(File::open(&path).unwrap());

            serde_json::from_reader(reader)
                .unwrap_or_else(|err| panic!("Invalid fixture {}: {}", path.display(), err))
        })
        .collect()
}
