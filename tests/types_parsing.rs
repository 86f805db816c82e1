// tests/types_parsing.rs

use officedag::{TaskStatus, TemplateKind};

#[test]
fn task_status_parses_loosely() {
    assert_eq!(" Running ".parse::<TaskStatus>(), Ok(TaskStatus::Running));
    assert_eq!("COMPLETED".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
    assert_eq!("skipped\n".parse::<TaskStatus>(), Ok(TaskStatus::Skipped));
}

#[test]
fn task_status_display_round_trips_through_from_str() {
    for status in TaskStatus::ALL {
        assert_eq!(status.to_string().parse::<TaskStatus>(), Ok(status));
    }
}

#[test]
fn task_status_rejects_unknown_values() {
    for bad in ["", "done", "run ning", "cancelled"] {
        let err = bad.parse::<TaskStatus>().unwrap_err();
        assert!(err.starts_with("invalid task status"), "{bad:?}: {err}");
    }
}

#[test]
fn template_kind_parses_loosely() {
    assert_eq!(" WebApp ".parse::<TemplateKind>(), Ok(TemplateKind::Webapp));
    assert_eq!("cli".parse::<TemplateKind>(), Ok(TemplateKind::Cli));
}

#[test]
fn template_kind_rejects_unknown_values() {
    let err = "desktop".parse::<TemplateKind>().unwrap_err();
    assert!(err.contains("desktop"));
    assert!(err.contains("expected \"webapp\" or \"cli\""));

    assert!("web app".parse::<TemplateKind>().is_err());
}
