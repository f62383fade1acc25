//! Constants for the export configuration and the connection URL built from it.
//!
//! The export tools read their settings from an INI file (`config.ini` by default)
//! of the form
//!
//! ```text
//! [server]
//! uid  = <username>
//! pwd  = <password>
//! host = <host>
//! port = <port>
//!
//! [save]
//! extension = <file extension of the produced files>
//! ```
//!
//! and connect to the database with a URL of the form
//!
//! ```text
//! hdb://<username>:<password>@<host>:<port>
//! ```
//!
//! See [`ExportParams`](crate::ExportParams).

/// Scheme of the connection URL.
pub const HDB: &str = "hdb";

/// Section with the database server settings.
pub const SECTION_SERVER: &str = "server";

/// Key for the database user.
pub const KEY_USER: &str = "uid";

/// Key for the password of the database user.
pub const KEY_PASSWORD: &str = "pwd";

/// Key for the host.
pub const KEY_HOST: &str = "host";

/// Key for the port.
pub const KEY_PORT: &str = "port";

/// Section with the output settings.
pub const SECTION_SAVE: &str = "save";

/// Key for the extension of the produced files.
pub const KEY_EXTENSION: &str = "extension";
