//! Integration tests: credentials file on disk, file-backed storage, and the
//! application context tying them together

use oauth_sampleapp::{
    AppConfig, AuthGrant, AuthMode, AuthStorage, CredentialSet, CredentialSource, FileStorage,
    SampleApp, Token,
};
use std::path::Path;
use tempfile::TempDir;

const CREDENTIALS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<credentials>
    <clientId>abc</clientId>
    <redirectUrl>app://cb</redirectUrl>
    <scriptClientId>script-id</scriptClientId>
    <scriptClientSecret>script-secret</scriptClientSecret>
    <username>bob</username>
    <password>hunter2</password>
    <unrecognized>ignored</unrecognized>
    <scope>read</scope>
    <scope>identity</scope>
</credentials>
"#;

fn setup(dir: &Path) -> anyhow::Result<AppConfig> {
    let credentials = dir.join("credentials.xml");
    std::fs::write(&credentials, CREDENTIALS)?;
    Ok(AppConfig::builder()
        .base_url("https://example.com")
        .credentials(CredentialSource::File(credentials))
        .storage_path(dir.join("state").join("auth.json"))
        .build())
}

#[test]
fn test_credentials_from_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = setup(dir.path())?;

    let creds = CredentialSet::load(&config.credentials)?;
    assert_eq!(creds.client_id, "abc");
    assert_eq!(creds.redirect_url, "app://cb");
    assert_eq!(creds.script_client_id, "script-id");
    assert_eq!(creds.script_client_secret, "script-secret");
    assert_eq!(creds.username, "bob");
    assert_eq!(creds.password, "hunter2");
    assert_eq!(creds.scopes, vec!["read", "identity"]);
    Ok(())
}

#[test]
fn test_fresh_install_has_no_client() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = SampleApp::new(setup(dir.path())?);

    assert!(app.load_client(None)?.is_none());
    assert!(app.bearer().is_none());
    Ok(())
}

#[test]
fn test_mode_and_token_survive_restart() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = setup(dir.path())?;
    let token = Token::new("access").with_refresh_token("refresh");

    // First run: explicit mode, authentication completes and is recorded
    {
        let mut app = SampleApp::new(config.clone());
        let client = app
            .load_client(Some(AuthMode::Script))?
            .expect("explicit mode always builds a client");
        client.storage().save(client.mode(), &token)?;
        app.set_bearer(token.clone());
        assert_eq!(app.bearer(), Some(token.clone()));
    }

    // Second run: mode and token come back from storage
    let mut app = SampleApp::new(config.clone());
    let client = app
        .load_client(None)?
        .expect("stored mode should be recovered");
    assert_eq!(
        client.grant(),
        &AuthGrant::Script {
            username: "bob".to_string(),
            password: "hunter2".to_string(),
            client_id: "script-id".to_string(),
            client_secret: "script-secret".to_string(),
        }
    );
    assert_eq!(client.scopes(), ["read", "identity"]);
    assert_eq!(app.bearer(), Some(token));

    let storage = FileStorage::with_path(config.storage_path);
    assert_eq!(storage.auth_mode(), Some(AuthMode::Script));
    Ok(())
}

#[test]
fn test_explicit_mode_overrides_stored_mode() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = setup(dir.path())?;
    FileStorage::with_path(&config.storage_path)
        .save(AuthMode::Script, &Token::new("access"))?;

    let mut app = SampleApp::new(config);
    let client = app
        .load_client(Some(AuthMode::InstalledApp))?
        .expect("explicit mode always builds a client");
    assert_eq!(
        client.grant(),
        &AuthGrant::InstalledApp {
            client_id: "abc".to_string(),
            redirect_url: "app://cb".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_missing_credentials_file_aborts_load() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = AppConfig::builder()
        .credentials(CredentialSource::File(dir.path().join("missing.xml")))
        .storage_path(dir.path().join("auth.json"))
        .build();

    let mut app = SampleApp::new(config);
    assert!(app.load_client(Some(AuthMode::Userless)).is_err());
    assert!(app.client().is_none());
    Ok(())
}

#[test]
fn test_failed_reload_keeps_previous_client() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = SampleApp::new(setup(dir.path())?);
    app.load_client(Some(AuthMode::Userless))?;

    std::fs::remove_file(dir.path().join("credentials.xml"))?;
    assert!(app.load_client(Some(AuthMode::Script)).is_err());

    let client = app.client().expect("previous client should survive");
    assert_eq!(client.mode(), AuthMode::Userless);
    Ok(())
}
