use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque handle to a page element, assigned by the driver for the current
/// extraction. Invalidated by any navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef(pub u64);

/// A page element under consideration during resolution, with the fixed
/// attribute bundle read once at extraction time.
///
/// Absent attributes are normalized to empty strings (or false for flags),
/// so scoring code never branches on Option.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(rename = "ref")]
    pub element_ref: ElementRef,
    pub tag: String,
    #[serde(rename = "type", default)]
    pub input_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(rename = "ariaLabel", default)]
    pub aria_label: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "className", default)]
    pub class_name: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub href: String,
    /// Text of the <label for=...> associated with this element, resolved
    /// by the driver at extraction time.
    #[serde(rename = "labelText", default)]
    pub label_text: String,
    /// Text content of the enclosing container. Checkboxes rarely carry
    /// descriptive attributes of their own.
    #[serde(rename = "containerText", default)]
    pub container_text: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_true")]
    pub displayed: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub checked: bool,
}

fn default_true() -> bool {
    true
}

impl Candidate {
    /// An element with every attribute blank, for building page models in
    /// mocks and tests. Flags default to displayed and enabled.
    pub fn new(element_ref: u64, tag: &str) -> Candidate {
        Candidate {
            element_ref: ElementRef(element_ref),
            tag: tag.to_string(),
            input_type: String::new(),
            name: String::new(),
            id: String::new(),
            placeholder: String::new(),
            aria_label: String::new(),
            title: String::new(),
            text: String::new(),
            class_name: String::new(),
            style: String::new(),
            value: String::new(),
            href: String::new(),
            label_text: String::new(),
            container_text: String::new(),
            role: String::new(),
            displayed: true,
            enabled: true,
            checked: false,
        }
    }

    /// Decode one element from raw driver JSON. Returns None on any decode
    /// failure so one unreadable element never aborts the rest of the scan.
    pub fn from_value(raw: &Value) -> Option<Candidate> {
        serde_json::from_value(raw.clone()).ok()
    }

    /// Decode an extraction's element array, skipping unreadable entries.
    pub fn decode_all(raw: &[Value]) -> Vec<Candidate> {
        raw.iter().filter_map(Candidate::from_value).collect()
    }

    /// Name, id, placeholder, aria-label, and label text joined and
    /// lowercased. The keyword-attribute stage matches against this.
    pub fn attribute_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name, self.id, self.placeholder, self.aria_label, self.label_text
        )
        .to_lowercase()
    }

    /// Own attributes plus label and container text, for checkbox roles.
    pub fn checkbox_context(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name, self.id, self.value, self.label_text, self.container_text
        )
        .to_lowercase()
    }

    pub fn tag_is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn type_is(&self, input_type: &str) -> bool {
        self.input_type.eq_ignore_ascii_case(input_type)
    }

    /// True for button-shaped elements: <button>, role=button divs/spans,
    /// and submit/button inputs.
    pub fn is_button_like(&self) -> bool {
        self.tag_is("button")
            || self.role.eq_ignore_ascii_case("button")
            || (self.tag_is("input") && (self.type_is("submit") || self.type_is("button")))
    }

    /// True for link-shaped elements.
    pub fn is_link_like(&self) -> bool {
        self.tag_is("a") || self.is_button_like()
    }

    /// Text-type input in the loose sense the original forms use: an <input>
    /// with no type, type=text, or the nonstandard type=input.
    pub fn is_text_input(&self) -> bool {
        self.tag_is("input")
            && (self.input_type.is_empty() || self.type_is("text") || self.type_is("input"))
    }
}
