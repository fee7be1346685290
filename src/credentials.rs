//! Credential loading from the XML credentials resource
//!
//! The resource is a flat list of tags; nesting is irrelevant and unknown tags
//! are skipped, so a file written for a newer version still loads:
//!
//! ```xml
//! <credentials>
//!     <clientId>abc</clientId>
//!     <redirectUrl>app://cb</redirectUrl>
//!     <scope>read</scope>
//!     <scope>identity</scope>
//! </credentials>
//! ```
//!
//! Missing tags are not an error; the matching field stays empty.

use crate::error::Result;
use quick_xml::errors::IllFormedError;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fmt;
use std::path::{Path, PathBuf};

/// Credentials resource compiled into the binary
pub const BUNDLED_CREDENTIALS: &str = include_str!("../res/credentials.xml");

/// Where the credentials resource is read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CredentialSource {
    /// The resource bundled with the application
    #[default]
    Bundled,
    /// An XML file on disk
    File(PathBuf),
}

impl CredentialSource {
    /// Read the raw resource text
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Bundled => Ok(BUNDLED_CREDENTIALS.to_string()),
            Self::File(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

/// Identifiers and secrets for every supported authentication mode
///
/// Fields not used by the chosen mode are simply left empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    /// Client id for installed-app and userless authentication
    pub client_id: String,
    /// Redirect URL for installed-app authentication
    pub redirect_url: String,

    /// Client id for script authentication
    pub script_client_id: String,
    /// Client secret for script authentication
    pub script_client_secret: String,
    /// Account username for script authentication
    pub username: String,
    /// Account password for script authentication
    pub password: String,

    /// Requested scopes, in document order
    pub scopes: Vec<String>,
}

impl CredentialSet {
    /// Load credentials from the given source
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or is not well-formed XML.
    pub fn load(source: &CredentialSource) -> Result<Self> {
        let xml = source.read()?;
        let credentials = Self::from_xml(&xml)?;
        tracing::debug!(
            ?source,
            scopes = credentials.scopes.len(),
            "Loaded credentials"
        );
        Ok(credentials)
    }

    /// Load credentials from an XML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not well-formed XML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(&CredentialSource::File(path.as_ref().to_path_buf()))
    }

    /// Parse credentials from XML text
    ///
    /// # Errors
    ///
    /// Returns `SampleAppError::Xml` if the document is malformed.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut credentials = Self::default();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let Some(tag) = Tag::from_name(start.name().as_ref()) else {
                        continue;
                    };
                    let value = read_value(&mut reader, start.name().as_ref())?;
                    credentials.assign(tag, value);
                }
                Event::Empty(empty) => {
                    if let Some(tag) = Tag::from_name(empty.name().as_ref()) {
                        credentials.assign(tag, String::new());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(credentials)
    }

    fn assign(&mut self, tag: Tag, value: String) {
        match tag {
            Tag::ClientId => self.client_id = value,
            Tag::RedirectUrl => self.redirect_url = value,
            Tag::Scope => self.scopes.push(value),
            Tag::ScriptClientId => self.script_client_id = value,
            Tag::ScriptClientSecret => self.script_client_secret = value,
            Tag::Username => self.username = value,
            Tag::Password => self.password = value,
        }
    }
}

/// Text content up to the end tag matching an already consumed start tag
///
/// Entities in text are unescaped, CDATA is taken verbatim, comments and
/// processing instructions are dropped. Text of nested elements is kept.
fn read_value(reader: &mut Reader<&[u8]>, name: &[u8]) -> Result<String> {
    let mut value = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Text(text) => value.push_str(&text.unescape()?),
            Event::CData(cdata) => value.push_str(&String::from_utf8_lossy(&cdata.into_inner())),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(value),
            Event::End(_) => depth -= 1,
            Event::Eof => {
                let name = String::from_utf8_lossy(name).into_owned();
                return Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(name)).into());
            }
            _ => {}
        }
    }
}

// Secrets never end up in logs.
impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("client_id", &self.client_id)
            .field("redirect_url", &self.redirect_url)
            .field("script_client_id", &self.script_client_id)
            .field("script_client_secret", &redacted(&self.script_client_secret))
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("scopes", &self.scopes)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "<redacted>" }
}

/// Tag names recognized in the credentials resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    ClientId,
    RedirectUrl,
    Scope,
    ScriptClientId,
    ScriptClientSecret,
    Username,
    Password,
}

impl Tag {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"clientId" => Some(Self::ClientId),
            b"redirectUrl" => Some(Self::RedirectUrl),
            b"scope" => Some(Self::Scope),
            b"scriptClientId" => Some(Self::ScriptClientId),
            b"scriptClientSecret" => Some(Self::ScriptClientSecret),
            b"username" => Some(Self::Username),
            b"password" => Some(Self::Password),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SampleAppError;

    #[test]
    fn test_installed_app_example() {
        let creds = CredentialSet::from_xml(
            "<clientId>abc</clientId><redirectUrl>app://cb</redirectUrl>\
             <scope>read</scope><scope>identity</scope>",
        )
        .unwrap();

        assert_eq!(creds.client_id, "abc");
        assert_eq!(creds.redirect_url, "app://cb");
        assert_eq!(creds.scopes, vec!["read", "identity"]);
        assert!(creds.script_client_id.is_empty());
        assert!(creds.script_client_secret.is_empty());
        assert!(creds.username.is_empty());
        assert!(creds.password.is_empty());
    }

    #[test]
    fn test_scopes_keep_document_order() {
        let xml = r"<credentials>
            <scope>c</scope>
            <clientId>id</clientId>
            <scopes><scope>a</scope><scope>b</scope></scopes>
            <scope>a</scope>
        </credentials>";
        let creds = CredentialSet::from_xml(xml).unwrap();
        assert_eq!(creds.scopes, vec!["c", "a", "b", "a"]);
    }

    #[test]
    fn test_missing_tags_stay_empty() {
        let creds = CredentialSet::from_xml("<credentials></credentials>").unwrap();
        assert_eq!(creds, CredentialSet::default());

        let creds = CredentialSet::from_xml("").unwrap();
        assert_eq!(creds, CredentialSet::default());
    }

    #[test]
    fn test_script_fields() {
        let xml = "<credentials>\
            <scriptClientId>sid</scriptClientId>\
            <scriptClientSecret>s3cret</scriptClientSecret>\
            <username>bob</username>\
            <password>hunter2</password>\
        </credentials>";
        let creds = CredentialSet::from_xml(xml).unwrap();
        assert_eq!(creds.script_client_id, "sid");
        assert_eq!(creds.script_client_secret, "s3cret");
        assert_eq!(creds.username, "bob");
        assert_eq!(creds.password, "hunter2");
        assert!(creds.client_id.is_empty());
    }

    #[test]
    fn test_unknown_tags_ignored() {
        let xml = "<credentials><futureField>x</futureField><clientId>abc</clientId>\
                   <nested><deeper>y</deeper></nested></credentials>";
        let creds = CredentialSet::from_xml(xml).unwrap();
        assert_eq!(creds.client_id, "abc");
    }

    #[test]
    fn test_entities_unescaped() {
        let creds =
            CredentialSet::from_xml("<password>a&amp;b&lt;c</password>").unwrap();
        assert_eq!(creds.password, "a&b<c");
    }

    #[test]
    fn test_cdata_taken_verbatim() {
        let creds = CredentialSet::from_xml(
            "<clientId><![CDATA[abc]]></clientId><password><![CDATA[a&b<c]]></password>",
        )
        .unwrap();
        assert_eq!(creds.client_id, "abc");
        assert_eq!(creds.password, "a&b<c");
    }

    #[test]
    fn test_text_and_cdata_concatenate() {
        let creds =
            CredentialSet::from_xml("<password>x&amp;<![CDATA[&y]]>z</password>").unwrap();
        assert_eq!(creds.password, "x&&yz");
    }

    #[test]
    fn test_comments_inside_value_skipped() {
        let xml = "<credentials>\
            <clientId>abc<!-- note --></clientId>\
            <scope><!-- first -->read<?pi data?></scope>\
        </credentials>";
        let creds = CredentialSet::from_xml(xml).unwrap();
        assert_eq!(creds.client_id, "abc");
        assert_eq!(creds.scopes, vec!["read"]);
    }

    #[test]
    fn test_unclosed_value_is_error() {
        let result = CredentialSet::from_xml("<credentials><clientId>abc");
        assert!(matches!(result, Err(SampleAppError::Xml(_))));
    }

    #[test]
    fn test_self_closing_tag_is_empty_value() {
        let creds = CredentialSet::from_xml("<scope/><scope>read</scope><clientId/>").unwrap();
        assert_eq!(creds.scopes, vec!["", "read"]);
        assert!(creds.client_id.is_empty());
    }

    #[test]
    fn test_last_occurrence_wins_for_single_fields() {
        let creds =
            CredentialSet::from_xml("<clientId>first</clientId><clientId>second</clientId>")
                .unwrap();
        assert_eq!(creds.client_id, "second");
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let result = CredentialSet::from_xml("<credentials><other></mismatch></credentials>");
        assert!(matches!(result, Err(SampleAppError::Xml(_))));
    }

    #[test]
    fn test_bundled_resource_loads() {
        let creds = CredentialSet::load(&CredentialSource::Bundled).unwrap();
        assert!(!creds.client_id.is_empty());
        assert!(!creds.scopes.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CredentialSet::from_path("/definitely/not/here/credentials.xml");
        assert!(matches!(result, Err(SampleAppError::Io(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = CredentialSet {
            script_client_secret: "s3cret".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
