use std::fmt;

/// The intended purpose of a UI control, independent of its concrete markup.
///
/// Each role carries its own keyword tables; resolution never depends on
/// exact selectors, only on these semantic signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticRole {
    EmailInput,
    PasswordInput,
    ConfirmPasswordInput,
    UsernameInput,
    FacultyCheckbox,
    SubmitButton,
    NameInput,
    DescriptionTextarea,
    CreateButton,
    PlusTrigger,
    /// A link or button that navigates somewhere, matched by text keywords.
    NavLink(Vec<String>),
}

impl SemanticRole {
    /// Convenience constructor for NavLink from static keyword lists.
    pub fn nav_link(keywords: &[&str]) -> Self {
        SemanticRole::NavLink(keywords.iter().map(|k| k.to_string()).collect())
    }

    /// The default nav-link keyword set for opening a course or module
    /// detail surface from a card.
    pub fn detail_link() -> Self {
        Self::nav_link(&["view", "module", "detail", "open", "enter"])
    }

    /// Keywords matched against name/id/placeholder/aria-label/label text
    /// in the keyword-attribute stage.
    pub fn attribute_keywords(&self) -> Vec<String> {
        match self {
            SemanticRole::EmailInput => to_owned(&["email"]),
            SemanticRole::PasswordInput => to_owned(&["password"]),
            SemanticRole::ConfirmPasswordInput => to_owned(&["confirm", "repeat"]),
            SemanticRole::UsernameInput => to_owned(&["username", "user", "name"]),
            SemanticRole::FacultyCheckbox => to_owned(&["faculty", "instructor", "teacher"]),
            SemanticRole::SubmitButton => {
                to_owned(&["sign up", "register", "sign in", "login", "submit", "continue"])
            }
            SemanticRole::NameInput => to_owned(&["course name", "name", "title"]),
            SemanticRole::DescriptionTextarea => to_owned(&["description", "desc", "about"]),
            SemanticRole::CreateButton => to_owned(&["create", "add", "submit", "save"]),
            SemanticRole::PlusTrigger => to_owned(&["plus", "add", "create"]),
            SemanticRole::NavLink(keywords) => keywords.clone(),
        }
    }

    /// Keywords that disqualify a candidate for this role. Used to keep the
    /// plain password field from matching its confirm twin.
    pub fn exclusion_keywords(&self) -> Vec<String> {
        match self {
            SemanticRole::PasswordInput => to_owned(&["confirm", "repeat"]),
            _ => Vec::new(),
        }
    }

    /// Tag the last-resort first-element-of-tag fallback scans for. Only
    /// loosely-labelled form roles get a fallback; email/password fields
    /// are identified by their attributes or not at all.
    pub fn fallback_tag(&self) -> Option<&'static str> {
        match self {
            SemanticRole::UsernameInput | SemanticRole::NameInput => Some("input"),
            SemanticRole::DescriptionTextarea => Some("textarea"),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticRole::EmailInput => write!(f, "email input"),
            SemanticRole::PasswordInput => write!(f, "password input"),
            SemanticRole::ConfirmPasswordInput => write!(f, "confirm-password input"),
            SemanticRole::UsernameInput => write!(f, "username input"),
            SemanticRole::FacultyCheckbox => write!(f, "faculty checkbox"),
            SemanticRole::SubmitButton => write!(f, "submit button"),
            SemanticRole::NameInput => write!(f, "name input"),
            SemanticRole::DescriptionTextarea => write!(f, "description textarea"),
            SemanticRole::CreateButton => write!(f, "create button"),
            SemanticRole::PlusTrigger => write!(f, "plus button"),
            SemanticRole::NavLink(keywords) => write!(f, "nav link ({})", keywords.join("/")),
        }
    }
}

fn to_owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}
