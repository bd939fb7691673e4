use flowcheck::browser::Driver;
use flowcheck::browser::mock::{MockAction, MockDriver, MockPage};
use flowcheck::cli::config::SuiteConfig;
use flowcheck::resolver::candidate::{Candidate, ElementRef};
use flowcheck::scenario::flows::{FlowRunner, run_scenario};
use flowcheck::scenario::identity::RunIdentity;
use flowcheck::trace::logger::TraceLogger;

// =========================================================================
// Helpers
// =========================================================================

const BASE: &str = "http://localhost:5173";

fn test_config() -> SuiteConfig {
    SuiteConfig {
        base_url: BASE.to_string(),
        headless: true,
        wait_timeout_secs: 1,
        poll_ms: 1,
        settle_ms: 0,
        trace_path: None,
    }
}

fn input(r: u64, input_type: &str, name: &str) -> Candidate {
    let mut c = Candidate::new(r, "input");
    c.input_type = input_type.to_string();
    c.name = name.to_string();
    c
}

fn button(r: u64, text: &str) -> Candidate {
    let mut c = Candidate::new(r, "button");
    c.text = text.to_string();
    c
}

fn link(r: u64, text: &str, href: &str) -> Candidate {
    let mut c = Candidate::new(r, "a");
    c.text = text.to_string();
    c.href = href.to_string();
    c
}

fn signup_page() -> MockPage {
    MockPage::new("Sign Up")
        .with(input(0, "", "email"))
        .with(input(1, "password", "password"))
        .with(input(2, "password", "confirmPassword"))
        .with(button(3, "Sign Up"))
}

// =========================================================================
// Registration flow
// =========================================================================

#[test]
fn registration_fills_literal_signup_form_and_submits_once() {
    let mut driver = MockDriver::new();
    let signup_url = format!("{}/signup", BASE);
    let home_url = format!("{}/home", BASE);

    driver.add_page(&signup_url, signup_page());
    driver.on_click(&signup_url, ElementRef(3), &home_url);
    driver.add_page(&home_url, MockPage::new("Home").with_source("Welcome"));

    let config = test_config();
    let tracer = TraceLogger::disabled();
    let identity = RunIdentity::from_timestamp("testuser", 1700000000);
    let mut runner = FlowRunner::new(&mut driver, &config, &tracer, "registration", identity);

    runner.register().expect("Registration flow must succeed");

    // Final field values are exactly the generated credentials. The email
    // field may be touched twice (username fallback, then email proper);
    // what matters is what it ends up holding.
    assert_eq!(
        driver.fills_for(ElementRef(0)).last().copied(),
        Some("testuser_1700000000@example.com")
    );
    assert_eq!(driver.fills_for(ElementRef(1)), vec!["Password123!"]);
    assert_eq!(driver.fills_for(ElementRef(2)), vec!["Password123!"]);
    assert_eq!(driver.click_count(ElementRef(3)), 1);
}

#[test]
fn registration_stops_at_missing_required_field() {
    let mut driver = MockDriver::new();
    let signup_url = format!("{}/signup", BASE);

    // Email present, no password field anywhere.
    driver.add_page(
        &signup_url,
        MockPage::new("Sign Up")
            .with(input(0, "email", "email"))
            .with(button(1, "Sign Up")),
    );

    let config = test_config();
    let tracer = TraceLogger::disabled();
    let report = run_scenario("registration", &mut driver, &config, &tracer);

    assert!(!report.passed);
    let error = report.error.expect("Missing required role must be reported");
    assert!(error.contains("password input"), "got: {}", error);
    assert!(error.contains("registration"), "got: {}", error);

    // The flow must not reach the submit click.
    assert_eq!(driver.click_count(ElementRef(1)), 0);
}

#[test]
fn registration_warns_but_continues_without_optional_fields() {
    let mut driver = MockDriver::new();
    let signup_url = format!("{}/signup", BASE);
    let home_url = format!("{}/home", BASE);

    // No username, no confirm password, no faculty checkbox.
    driver.add_page(
        &signup_url,
        MockPage::new("Sign Up")
            .with(input(0, "email", "email"))
            .with(input(1, "password", "password"))
            .with(button(2, "Sign Up")),
    );
    driver.on_click(&signup_url, ElementRef(2), &home_url);
    driver.add_page(&home_url, MockPage::new("Home"));

    let config = test_config();
    let tracer = TraceLogger::disabled();
    let report = run_scenario("registration", &mut driver, &config, &tracer);

    assert!(report.passed, "error: {:?}", report.error);
    assert!(report.warnings >= 2, "expected optional-field warnings");
}

// =========================================================================
// Auth flow
// =========================================================================

#[test]
fn auth_skips_login_when_registration_lands_on_dashboard() {
    let mut driver = MockDriver::new();
    let signup_url = format!("{}/signup", BASE);
    let home_url = format!("{}/home", BASE);

    driver.add_page(&signup_url, signup_page());
    driver.on_click(&signup_url, ElementRef(3), &home_url);
    driver.add_page(&home_url, MockPage::new("Home").with_source("Welcome"));

    let config = test_config();
    let tracer = TraceLogger::disabled();
    let report = run_scenario("auth", &mut driver, &config, &tracer);

    assert!(report.passed, "error: {:?}", report.error);

    let visited_signin = driver
        .actions
        .iter()
        .any(|a| matches!(a, MockAction::Navigate(url) if url.contains("signin")));
    assert!(!visited_signin, "Login must be skipped when already authenticated");
}

// =========================================================================
// Course and module creation
// =========================================================================

#[test]
fn course_creation_uses_plus_trigger_and_modal_form() {
    let mut driver = MockDriver::new();
    let home_url = format!("{}/home", BASE);
    let modal_url = format!("{}/home#create", BASE);
    let created_url = format!("{}/home?created", BASE);

    let mut plus = button(1, "+");
    plus.class_name = "bg-blue-600 rounded-full".to_string();

    driver.add_page(
        &home_url,
        MockPage::new("Home").with(button(0, "Logout")).with(plus),
    );
    driver.on_click(&home_url, ElementRef(1), &modal_url);

    let mut description = Candidate::new(11, "textarea");
    description.name = "description".to_string();
    driver.add_page(
        &modal_url,
        MockPage::new("Home")
            .with(input(10, "text", "courseName"))
            .with(description)
            .with(button(12, "Create")),
    );
    driver.on_click(&modal_url, ElementRef(12), &created_url);
    driver.add_page(
        &created_url,
        MockPage::new("Home").with_source("Test Course 1700000000"),
    );

    driver.navigate(&home_url).expect("navigate");

    let config = test_config();
    let tracer = TraceLogger::disabled();
    let identity = RunIdentity::from_timestamp("course_creator", 1700000000);
    let mut runner = FlowRunner::new(&mut driver, &config, &tracer, "course", identity);

    runner.create_course().expect("Course creation must succeed");

    assert_eq!(driver.click_count(ElementRef(1)), 1, "plus trigger clicked once");
    assert_eq!(driver.click_count(ElementRef(0)), 0, "unrelated button untouched");
    assert_eq!(
        driver.fills_for(ElementRef(10)),
        vec!["Test Course 1700000000"]
    );
    assert_eq!(
        driver.fills_for(ElementRef(11)),
        vec!["Test course description 1700000000"]
    );
    assert_eq!(driver.click_count(ElementRef(12)), 1);
}

#[test]
fn open_course_follows_detail_link() {
    let mut driver = MockDriver::new();
    let home_url = format!("{}/home", BASE);
    let course_url = format!("{}/course/1", BASE);

    driver.add_page(
        &home_url,
        MockPage::new("Home")
            .with(link(0, "Logout", "/logout"))
            .with(link(1, "View Course", "/course/1")),
    );
    driver.on_click(&home_url, ElementRef(1), &course_url);
    driver.add_page(&course_url, MockPage::new("Course"));

    driver.navigate(&home_url).expect("navigate");

    let config = test_config();
    let tracer = TraceLogger::disabled();
    let identity = RunIdentity::from_timestamp("course_creator", 1700000000);
    let mut runner = FlowRunner::new(&mut driver, &config, &tracer, "course", identity);

    runner.open_course().expect("Opening the course must succeed");
    assert_eq!(runner.state.last_url, course_url);

    assert_eq!(driver.click_count(ElementRef(1)), 1);
}

// =========================================================================
// Navigation scenario and dispatch
// =========================================================================

#[test]
fn navigation_scenario_checks_auth_pages() {
    let mut driver = MockDriver::new();
    driver.add_page(&format!("{}/signin", BASE), MockPage::new("Sign In"));
    driver.add_page(&format!("{}/signup", BASE), MockPage::new("Sign Up"));
    driver.add_page(&format!("{}/profile", BASE), MockPage::new("Profile"));

    let config = test_config();
    let tracer = TraceLogger::disabled();
    let report = run_scenario("navigation", &mut driver, &config, &tracer);

    assert!(report.passed, "error: {:?}", report.error);
    assert_eq!(report.steps.len(), 3);
}

#[test]
fn unknown_scenario_fails_to_start() {
    let mut driver = MockDriver::new();
    let config = test_config();
    let tracer = TraceLogger::disabled();

    let report = run_scenario("bogus", &mut driver, &config, &tracer);

    assert!(!report.passed);
    assert!(report.error.expect("error expected").contains("Unknown scenario"));
    assert!(driver.actions.is_empty());
}

// =========================================================================
// Generated identities
// =========================================================================

#[test]
fn identity_derives_all_names_from_one_timestamp() {
    let identity = RunIdentity::from_timestamp("testuser", 1700000000);

    assert_eq!(identity.email, "testuser_1700000000@example.com");
    assert_eq!(identity.username, "testuser_1700000000");
    assert_eq!(identity.password, "Password123!");
    assert_eq!(identity.course_name, "Test Course 1700000000");
    assert_eq!(identity.module_name, "module_1700000000");
}
