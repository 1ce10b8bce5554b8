use orm_dialect_core::{Error, ErrorContext, Result, truncate_long};
use std::{borrow::Cow, collections::BTreeMap};
use url::Url;
use urlencoding::decode;

/// Parsed NuoDB data source name.
///
/// Format: `nuodb://[user[:password]@]host[:port]/database[?schema=..&timezone=..]`.
/// Query parameters other than `schema` and `timezone` are kept in `properties`
/// and forwarded to the driver untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuoDbDsn {
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub schema: Option<String>,
    pub timezone: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl NuoDbDsn {
    pub const SCHEME: &'static str = "nuodb";
    pub const DEFAULT_PORT: u16 = 48004;

    pub fn parse(dsn: &str) -> Result<Self> {
        let context = || format!("While parsing the NuoDB dsn `{}`", truncate_long!(dsn));
        let prefix = format!("{}://", Self::SCHEME);
        if !dsn.starts_with(&prefix) {
            return Err(Error::msg(format!(
                "NuoDB connection url must start with `{}`",
                &prefix
            ))
            .context(context()));
        }
        let url = Url::parse(dsn).with_context(context)?;
        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_owned(),
            _ => {
                return Err(
                    Error::msg("NuoDB connection url is missing the host").context(context()),
                );
            }
        };
        let database = decode(url.path().trim_start_matches('/'))
            .with_context(context)?
            .into_owned();
        if database.is_empty() || database.contains('/') {
            return Err(Error::msg(format!(
                "NuoDB connection url must name exactly one database, found `{}`",
                database
            ))
            .context(context()));
        }
        let user = match url.username() {
            "" => None,
            v => Some(decode(v).with_context(context)?.into_owned()),
        };
        let password = url
            .password()
            .map(decode)
            .transpose()
            .with_context(context)?
            .map(Cow::into_owned);
        let mut schema = None;
        let mut timezone = None;
        let mut properties = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            match &*key {
                "schema" => schema = Some(value.into_owned()),
                "timezone" => timezone = Some(value.into_owned()),
                _ => {
                    properties.insert(key.into_owned(), value.into_owned());
                }
            }
        }
        Ok(Self {
            user,
            password,
            host,
            port: url.port().unwrap_or(Self::DEFAULT_PORT),
            database,
            schema,
            timezone,
            properties,
        })
    }
}
