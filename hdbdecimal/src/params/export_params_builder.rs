use crate::{url as cfg, ExportParams, HdbError, HdbResult, IniFile};
use secstr::SecUtf8;

/// A builder for `ExportParams`.
///
/// # Instantiating an `ExportParamsBuilder` programmatically
///
/// ```rust
/// use hdbdecimal::ExportParams;
///
/// let export_params = ExportParams::builder()
///     .hostname("abcd123")
///     .port(30015)
///     .dbuser("MEIER")
///     .password("schlau")
///     .extension("csv")
///     .build()
///     .unwrap();
/// ```
///
/// # Instantiating an `ExportParamsBuilder` from a configuration file
///
/// See module [`url`](crate::url) for the supported keys.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct ExportParamsBuilder {
    hostname: Option<String>,
    port: Option<u16>,
    dbuser: Option<String>,
    #[serde(skip)]
    password: Option<SecUtf8>,
    extension: Option<String>,
}

impl ExportParamsBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the values of sections `[server]` and `[save]`.
    ///
    /// # Errors
    ///
    /// `HdbError::UsageDetailed` if the port is not a number in the range of `u16`.
    pub fn from_ini(ini: &IniFile) -> HdbResult<Self> {
        let mut builder = Self::new();
        if let Some(host) = ini.get(cfg::SECTION_SERVER, cfg::KEY_HOST) {
            builder.hostname(host);
        }
        if let Some(port) = ini.get(cfg::SECTION_SERVER, cfg::KEY_PORT) {
            builder.port(
                port.parse::<u16>()
                    .map_err(|e| crate::usage_err!("invalid port '{port}': {e}"))?,
            );
        }
        if let Some(dbuser) = ini.get(cfg::SECTION_SERVER, cfg::KEY_USER) {
            builder.dbuser(dbuser);
        }
        if let Some(pw) = ini.get(cfg::SECTION_SERVER, cfg::KEY_PASSWORD) {
            builder.password(pw);
        }
        if let Some(ext) = ini.get(cfg::SECTION_SAVE, cfg::KEY_EXTENSION) {
            builder.extension(ext);
        }
        Ok(builder)
    }

    /// Sets the hostname.
    pub fn hostname<H: AsRef<str>>(&mut self, hostname: H) -> &mut Self {
        self.hostname = Some(hostname.as_ref().to_owned());
        self
    }

    /// Sets the port.
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Sets the database user.
    pub fn dbuser<D: AsRef<str>>(&mut self, dbuser: D) -> &mut Self {
        self.dbuser = Some(dbuser.as_ref().to_owned());
        self
    }

    /// Sets the password.
    pub fn password<P: AsRef<str>>(&mut self, pw: P) -> &mut Self {
        self.password = Some(SecUtf8::from(pw.as_ref()));
        self
    }

    /// Unsets the password.
    pub fn unset_password(&mut self) -> &mut Self {
        self.password = None;
        self
    }

    /// Sets the extension of the produced files; a leading dot is ignored.
    pub fn extension<E: AsRef<str>>(&mut self, extension: E) -> &mut Self {
        let ext = extension.as_ref().trim_start_matches('.');
        self.extension = if ext.is_empty() {
            None
        } else {
            Some(ext.to_owned())
        };
        self
    }

    /// Constructs an `ExportParams` from the builder.
    ///
    /// # Errors
    ///
    /// `HdbError::Usage` if hostname, port or dbuser are missing, or the port is 0.
    /// `HdbError::ConnParams` if the hostname cannot be used in a URL.
    pub fn build(&self) -> HdbResult<ExportParams> {
        let host = self
            .hostname
            .as_ref()
            .filter(|h| !h.is_empty())
            .cloned()
            .ok_or(HdbError::Usage("hostname is missing"))?;

        let port = self.port.ok_or(HdbError::Usage("port is missing"))?;
        if port == 0 {
            return Err(HdbError::Usage("port must not be 0"));
        }

        let dbuser: String = self
            .dbuser
            .as_ref()
            .filter(|u| !u.is_empty())
            .cloned()
            .ok_or(HdbError::Usage("dbuser is missing"))?;

        let password = self.password.clone().unwrap_or_else(|| SecUtf8::from(""));

        ExportParams::new(host, port, dbuser, password, self.extension.clone())
    }

    /// Getter
    pub fn get_hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Getter
    pub fn get_dbuser(&self) -> Option<&str> {
        self.dbuser.as_deref()
    }

    /// Getter
    pub fn get_port(&self) -> Option<u16> {
        self.port
    }

    /// Getter
    pub fn get_extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
}

impl From<ExportParamsBuilder> for String {
    fn from(mut epb: ExportParamsBuilder) -> String {
        epb.unset_password();
        epb.to_string()
    }
}

impl std::fmt::Display for ExportParamsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}://{}@{}:{}",
            cfg::HDB,
            self.dbuser.as_deref().unwrap_or(""),
            self.hostname.as_deref().unwrap_or(""),
            self.port.map(|p| p.to_string()).unwrap_or_default()
        )
    }
}
