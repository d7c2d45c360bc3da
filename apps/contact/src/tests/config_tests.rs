use super::{apply_env, apply_file, load_settings, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_point_at_public_api() {
    let settings = Settings::default();
    assert_eq!(settings.emailjs_api_url, "https://api.emailjs.com");
    assert_eq!(settings.service_name, "YogaSeekho");
    assert_eq!(settings.request_timeout_secs, 15);
    assert_eq!(settings.emailjs_config().missing().len(), 3);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
emailjs_service_id = "service_yoga"
emailjs_template_id = "template_contact"
emailjs_public_key = "pk"
request_timeout_secs = 5
"#,
    )
    .expect("parse");

    let config = settings.emailjs_config();
    assert!(config.missing().is_empty());
    assert_eq!(config.service_name, "YogaSeekho");
    assert_eq!(settings.request_timeout().as_secs(), 5);
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "request_timeout_secs = \"soon\"").is_err());
}

#[test]
fn app_prefix_beats_plain_beats_vite() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("VITE_EMAILJS_SERVICE_ID", "from-vite"),
            ("EMAILJS_SERVICE_ID", "from-plain"),
            ("APP__EMAILJS_SERVICE_ID", "from-app"),
            ("VITE_EMAILJS_TEMPLATE_ID", "tpl-vite"),
            ("EMAILJS_PUBLIC_KEY", "pk-plain"),
        ]),
    );

    assert_eq!(settings.emailjs_service_id.as_deref(), Some("from-app"));
    assert_eq!(settings.emailjs_template_id.as_deref(), Some("tpl-vite"));
    assert_eq!(settings.emailjs_public_key.as_deref(), Some("pk-plain"));
}

#[test]
fn zero_timeout_in_file_is_rejected() {
    let mut settings = Settings::default();
    let err = apply_file(&mut settings, "request_timeout_secs = 0").expect_err("must reject");
    assert!(err.to_string().contains("greater than zero"), "unexpected error: {err}");
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn zero_timeout_in_env_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]));
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn zero_timeout_falls_back_to_default_duration() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), contact_core::emailjs::DEFAULT_TIMEOUT);
}

#[test]
fn unparseable_timeout_in_env_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("REQUEST_TIMEOUT_SECS", "soon")]));
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("contact_missing_{suffix}.toml"));

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.emailjs_api_url, Settings::default().emailjs_api_url);
}

#[test]
fn reads_settings_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("contact_settings_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("contact.toml");
    fs::write(&path, "service_name = \"Studio Test\"\n").expect("write");

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.service_name, "Studio Test");

    fs::remove_dir_all(temp_root).expect("cleanup");
}
