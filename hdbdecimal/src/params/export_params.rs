use crate::{url as cfg, ExportParamsBuilder, HdbError, HdbResult, IniFile};
use secstr::SecUtf8;
use std::path::Path;
use url::Url;

/// Name of the configuration file that the export tools read if nothing else is specified.
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// An immutable struct with what an export tool needs besides its query:
/// where the database is, who logs on, and how the produced files are named.
///
/// # Instantiating `ExportParams` from a configuration file
///
/// ```rust,no_run
/// use hdbdecimal::{ExportParams, DEFAULT_CONFIG_FILE};
///
/// let params = ExportParams::from_file(DEFAULT_CONFIG_FILE).unwrap();
/// let file_name = params.output_file_name("tcurr");
/// ```
///
/// `Display` and serialization show the connection URL without the password.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct ExportParams {
    host: String,
    port: u16,
    dbuser: String,
    #[serde(skip)]
    password: SecUtf8,
    extension: Option<String>,
    #[serde(skip)]
    base_url: Url,
}

impl ExportParams {
    pub(crate) fn new(
        host: String,
        port: u16,
        dbuser: String,
        password: SecUtf8,
        extension: Option<String>,
    ) -> HdbResult<Self> {
        let base_url = Url::parse(&format!("{}://{host}:{port}", cfg::HDB))
            .map_err(|e| HdbError::conn_params(Box::new(e)))?;
        if base_url.host_str().is_none() {
            return Err(crate::usage_err!("'{host}' is not a valid hostname"));
        }
        Ok(Self {
            host,
            port,
            dbuser,
            password,
            extension,
            base_url,
        })
    }

    /// Returns a new builder.
    pub fn builder() -> ExportParamsBuilder {
        ExportParamsBuilder::new()
    }

    /// Reads the configuration file and builds the parameters from it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HdbResult<Self> {
        Self::from_ini(&IniFile::load(path)?)
    }

    /// Builds the parameters from an already parsed configuration.
    pub fn from_ini(ini: &IniFile) -> HdbResult<Self> {
        ExportParamsBuilder::from_ini(ini)?.build()
    }

    /// The host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The database user.
    pub fn dbuser(&self) -> &str {
        &self.dbuser
    }

    /// The password.
    pub fn password(&self) -> &SecUtf8 {
        &self.password
    }

    /// The extension of the produced files, without leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// The connection URL including the password: `hdb://<uid>:<pwd>@<host>:<port>`.
    ///
    /// User and password are percent-encoded where necessary.
    pub fn dsn(&self) -> HdbResult<String> {
        let mut url = self.url_with_user()?;
        if !self.password.unsecure().is_empty() {
            url.set_password(Some(self.password.unsecure()))
                .map_err(|()| HdbError::Usage("password cannot be set"))?;
        }
        Ok(url.to_string())
    }

    /// The connection URL without the password.
    pub fn redacted_dsn(&self) -> String {
        self.url_with_user()
            .map_or_else(|_| self.base_url.to_string(), |url| url.to_string())
    }

    /// Name of the file for the given stem: `<stem>.<extension>`,
    /// or just the stem if no extension is configured.
    pub fn output_file_name(&self, stem: &str) -> String {
        match self.extension {
            Some(ref ext) => format!("{stem}.{ext}"),
            None => stem.to_string(),
        }
    }

    fn url_with_user(&self) -> HdbResult<Url> {
        let mut url = self.base_url.clone();
        url.set_username(&self.dbuser)
            .map_err(|()| HdbError::Usage("dbuser cannot be set"))?;
        Ok(url)
    }
}

impl From<ExportParams> for String {
    fn from(ep: ExportParams) -> String {
        ep.redacted_dsn()
    }
}

impl std::fmt::Display for ExportParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.redacted_dsn())
    }
}
