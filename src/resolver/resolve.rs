use crate::resolver::candidate::Candidate;
use crate::resolver::role::SemanticRole;

/// One ordered heuristic pass in the resolver's priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Structural attribute matches the role exactly (type=email, type=submit).
    ExactAttribute,
    /// Role keywords appear in name/id/placeholder/aria-label/label text.
    KeywordAttribute,
    /// Symbolic text, class keywords, style hints, link text.
    Structural,
    /// First element of the right tag, for simple single-control forms.
    Fallback,
}

/// Outcome of resolving one role against one page snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Candidate),
    NotFound {
        role: SemanticRole,
        stages_attempted: u8,
    },
}

impl Resolution {
    pub fn found(&self) -> Option<&Candidate> {
        match self {
            Resolution::Found(c) => Some(c),
            Resolution::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Resolve a semantic role against the candidates of the current page.
///
/// Pure and read-only: scoring never touches the page, so resolving twice
/// without intervening actions returns the same candidate.
pub fn resolve(role: &SemanticRole, candidates: &[Candidate]) -> Resolution {
    resolve_traced(role, candidates).0
}

/// Like `resolve`, but also reports which cascade stages actually ran, in
/// order. A stage runs only if every earlier stage produced zero candidates.
pub fn resolve_traced(role: &SemanticRole, candidates: &[Candidate]) -> (Resolution, Vec<Stage>) {
    let mut ran = Vec::new();

    for stage in stages_for(role) {
        ran.push(stage);
        if let Some(candidate) = run_stage(stage, role, candidates) {
            return (Resolution::Found(candidate.clone()), ran);
        }
    }

    let attempted = ran.len() as u8;
    (
        Resolution::NotFound {
            role: role.clone(),
            stages_attempted: attempted,
        },
        ran,
    )
}

/// The cascade for a role: only stages that can say something about it.
pub fn stages_for(role: &SemanticRole) -> Vec<Stage> {
    use SemanticRole::*;
    match role {
        EmailInput | PasswordInput | ConfirmPasswordInput | FacultyCheckbox => {
            vec![Stage::ExactAttribute, Stage::KeywordAttribute]
        }
        SubmitButton => vec![
            Stage::ExactAttribute,
            Stage::KeywordAttribute,
            Stage::Structural,
        ],
        UsernameInput | NameInput | DescriptionTextarea => {
            vec![Stage::KeywordAttribute, Stage::Fallback]
        }
        CreateButton | PlusTrigger | NavLink(_) => {
            vec![Stage::KeywordAttribute, Stage::Structural]
        }
    }
}

/// Run one stage: first candidate in document order that satisfies the
/// stage's predicate wins. No scoring beyond pass/fail.
fn run_stage<'a>(
    stage: Stage,
    role: &SemanticRole,
    candidates: &'a [Candidate],
) -> Option<&'a Candidate> {
    match stage {
        Stage::ExactAttribute => candidates.iter().find(|c| exact_match(role, c)),
        Stage::KeywordAttribute => candidates.iter().find(|c| keyword_match(role, c)),
        Stage::Structural => candidates.iter().find(|c| structural_match(role, c)),
        Stage::Fallback => {
            let tag = role.fallback_tag()?;
            match role {
                SemanticRole::UsernameInput => candidates.iter().find(|c| c.is_text_input()),
                _ => candidates.iter().find(|c| c.tag_is(tag)),
            }
        }
    }
}

fn exact_match(role: &SemanticRole, c: &Candidate) -> bool {
    match role {
        SemanticRole::EmailInput => c.tag_is("input") && c.type_is("email"),
        SemanticRole::PasswordInput => {
            c.tag_is("input")
                && c.type_is("password")
                && !contains_any(&c.attribute_text(), &role.exclusion_keywords())
        }
        SemanticRole::ConfirmPasswordInput => {
            c.tag_is("input")
                && c.type_is("password")
                && contains_any(&c.attribute_text(), &role.attribute_keywords())
        }
        SemanticRole::FacultyCheckbox => {
            let own = format!("{} {} {}", c.name, c.id, c.value).to_lowercase();
            c.type_is("checkbox") && contains_any(&own, &role.attribute_keywords())
        }
        SemanticRole::SubmitButton => {
            (c.tag_is("button") || c.tag_is("input")) && c.type_is("submit")
        }
        _ => false,
    }
}

fn keyword_match(role: &SemanticRole, c: &Candidate) -> bool {
    let keywords = role.attribute_keywords();
    match role {
        SemanticRole::EmailInput | SemanticRole::NameInput => {
            c.tag_is("input") && contains_any(&c.attribute_text(), &keywords)
        }
        SemanticRole::PasswordInput => {
            c.tag_is("input")
                && contains_any(&c.attribute_text(), &keywords)
                && !contains_any(&c.attribute_text(), &role.exclusion_keywords())
        }
        SemanticRole::ConfirmPasswordInput => {
            c.tag_is("input") && contains_any(&c.attribute_text(), &keywords)
        }
        SemanticRole::UsernameInput => {
            c.is_text_input() && contains_any(&c.attribute_text(), &keywords)
        }
        SemanticRole::DescriptionTextarea => {
            c.tag_is("textarea") && contains_any(&c.attribute_text(), &keywords)
        }
        SemanticRole::FacultyCheckbox => {
            c.type_is("checkbox") && contains_any(&c.checkbox_context(), &keywords)
        }
        SemanticRole::SubmitButton | SemanticRole::CreateButton => {
            let visible = format!("{} {}", c.text, c.value).to_lowercase();
            let haystack = format!("{} {}", visible, c.attribute_text());
            c.is_button_like() && contains_any(&haystack, &keywords)
        }
        SemanticRole::PlusTrigger => {
            plus_shaped(c) && contains_any(&c.attribute_text(), &keywords)
        }
        SemanticRole::NavLink(keywords) => {
            c.is_link_like() && contains_any(&c.attribute_text(), keywords)
        }
    }
}

fn structural_match(role: &SemanticRole, c: &Candidate) -> bool {
    if !(c.displayed && c.enabled) {
        return false;
    }
    match role {
        SemanticRole::PlusTrigger => {
            let class = c.class_name.to_lowercase();
            let style = c.style.to_lowercase();
            plus_shaped(c)
                && (c.text.contains('+')
                    || c.aria_label.contains('+')
                    || c.title.contains('+')
                    || contains_any_str(&class, &["plus", "add", "create"])
                    || contains_any_str(&style, &["fixed", "absolute", "bottom", "right"]))
        }
        SemanticRole::CreateButton => {
            let text = format!("{} {}", c.text, c.value).to_lowercase();
            let class = c.class_name.to_lowercase();
            c.is_button_like()
                && (contains_any_str(&text, &["create", "add", "submit", "save"])
                    || contains_any_str(&class, &["create", "save"]))
        }
        // Simple forms routinely have exactly one button; take the first
        // clickable one on the page.
        SemanticRole::SubmitButton => c.is_button_like(),
        SemanticRole::NavLink(keywords) => {
            let text = c.text.to_lowercase();
            let href = c.href.to_lowercase();
            c.is_link_like()
                && (contains_any(&text, keywords) || contains_any(&href, keywords))
        }
        _ => false,
    }
}

/// Element shapes the plus trigger scan covers: buttons, ARIA buttons,
/// bare spans used as click targets.
fn plus_shaped(c: &Candidate) -> bool {
    c.tag_is("button") || c.role.eq_ignore_ascii_case("button") || c.tag_is("span")
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

fn contains_any_str(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}
