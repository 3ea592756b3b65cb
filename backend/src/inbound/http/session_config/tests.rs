//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

/// Key file removed on drop.
struct KeyFile {
    path: PathBuf,
}

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("shops-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self { path }
    }

    fn path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn env_from(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

#[fixture]
fn key_file() -> KeyFile {
    KeyFile::with_len(SESSION_KEY_MIN_LEN)
}

fn release_vars(key_file: &KeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_file.path()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&env_from(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings unexpectedly accepted"),
        Err(err) => err,
    }
}

#[rstest]
fn release_accepts_complete_settings(key_file: KeyFile) {
    let settings = session_settings_from_env(&env_from(release_vars(&key_file)), BuildMode::Release)
        .expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(key_file: KeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(missing);
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "perhaps")]
fn release_rejects_malformed_toggles(
    key_file: KeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());
    let err = release_error(vars);
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv { name: reported, .. } if reported == name
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: KeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(key_file: KeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_missing_key_file(key_file: KeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("absent-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    );
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = KeyFile::with_len(32);
    let err = release_error(release_vars(&short));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 32, min_len: SESSION_KEY_MIN_LEN, .. }
    ));
}

#[rstest]
fn debug_falls_back_on_an_empty_environment() {
    let settings = session_settings_from_env(&env_from(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_falls_back_on_malformed_values(key_file: KeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(SAMESITE_ENV, "unexpected".to_owned());
    vars.insert(COOKIE_SECURE_ENV, "nah".to_owned());
    let settings =
        session_settings_from_env(&env_from(vars), BuildMode::Debug).expect("debug fallback");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_short_keys() {
    let short = KeyFile::with_len(8);
    assert!(session_settings_from_env(&env_from(release_vars(&short)), BuildMode::Debug).is_ok());
}

#[rstest]
#[case("1", Some(true))]
#[case("YES", Some(true))]
#[case("n", Some(false))]
#[case("off", None)]
fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
