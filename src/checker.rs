use std::str::FromStr;

use sea_orm::prelude::*;

use entity::url;
use entity::url_check;

/// A stalled remote must not hang the triggering request.
const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!("PageAnalyzer {}", env!("CARGO_PKG_VERSION")))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(FETCH_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}

/// Metadata lifted from a fetched page. Every field is optional; a page
/// without them is still a valid check.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PageMeta {
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched { status: u16, meta: PageMeta },
    ConnectionFailed,
}

/// Result of a completed check run as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum CheckOutcome {
    Checked { status_code: u16 },
    ConnectionFailed,
}

#[derive(Debug)]
pub enum CheckError {
    NotFound,
    Db(DbErr),
}

impl From<DbErr> for CheckError {
    fn from(value: DbErr) -> Self {
        Self::Db(value)
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "url not found"),
            Self::Db(e) => write!(f, "database error: {}", e),
        }
    }
}

/// Fetch a URL once. Any HTTP response, success or server error, counts as
/// fetched; only network-level failures (DNS, refused, reset, TLS, timeout)
/// report ConnectionFailed.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> FetchOutcome {
    let resp = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("Unable to fetch {}: {}", url, e);
            return FetchOutcome::ConnectionFailed;
        }
    };

    let status = resp.status().as_u16();

    let is_html = match resp.headers().get(reqwest::header::CONTENT_TYPE) {
        Some(v) => v
            .to_str()
            .ok()
            .and_then(|s| mime::Mime::from_str(s).ok())
            .map(|m| m.type_() == mime::TEXT && m.subtype() == mime::HTML)
            .unwrap_or(false),
        None => true, // no declared type, assume a page
    };

    if !is_html {
        return FetchOutcome::Fetched {
            status,
            meta: PageMeta::default(),
        };
    }

    let meta = match resp.bytes().await {
        Ok(body) => extract_meta(&body),
        Err(e) => {
            // The status line already arrived; keep the check, lose the fields.
            warn!("Unable to read body of {}: {}", url, e);
            PageMeta::default()
        }
    };

    FetchOutcome::Fetched { status, meta }
}

/// Pull h1/title/meta-description out of an HTML body. Absent elements are
/// absent fields; a body that does not parse yields no fields at all.
pub fn extract_meta(body: &[u8]) -> PageMeta {
    use select::predicate::{Attr, Name, Predicate};

    let document = match select::document::Document::from_read(std::io::Cursor::new(body)) {
        Ok(d) => d,
        Err(e) => {
            warn!("Unable to parse body as HTML: {}", e);
            return PageMeta::default();
        }
    };

    let h1 = document
        .find(Name("h1"))
        .next()
        .map(|n| n.text())
        .and_then(|t| clean(&t));
    let title = document
        .find(Name("title"))
        .next()
        .map(|n| n.text())
        .and_then(|t| clean(&t));
    let description = document
        .find(Name("meta").and(Attr("name", "description")))
        .next()
        .and_then(|n| n.attr("content"))
        .and_then(clean);

    PageMeta {
        h1: h1.map(|s| clip(s, 255)),
        title: title.map(|s| clip(s, 255)),
        description,
    }
}

fn clean(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

// h1 and title land in varchar(255) columns; clip on a char boundary.
fn clip(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}

/// Run one check: resolve the stored URL, fetch it, extract metadata, and
/// append a url_checks row. ConnectionFailed writes nothing and is reported
/// as an outcome rather than an error, so the caller can surface it as a
/// notice and the check stays retryable.
pub async fn run(
    db: &DatabaseConnection,
    client: &reqwest::Client,
    url_id: i64,
) -> Result<CheckOutcome, CheckError> {
    let target = url::Entity::find_by_id(url_id)
        .one(db)
        .await?
        .ok_or(CheckError::NotFound)?;

    info!("Checking {}", target.name);
    let (status, meta) = match fetch_page(client, &target.name).await {
        FetchOutcome::Fetched { status, meta } => (status, meta),
        FetchOutcome::ConnectionFailed => return Ok(CheckOutcome::ConnectionFailed),
    };

    url_check::Entity::insert(url_check::ActiveModel {
        url_id: sea_orm::Set(target.id),
        status_code: sea_orm::Set(Some(status as i16)),
        h1: sea_orm::Set(meta.h1),
        title: sea_orm::Set(meta.title),
        description: sea_orm::Set(meta.description),
        created_at: sea_orm::Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    })
    .exec(db)
    .await?;

    Ok(CheckOutcome::Checked {
        status_code: status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_three_fields() {
        let body = b"<html><head><title>T</title>\
            <meta name=\"description\" content=\"D\"></head>\
            <body><h1>Hi</h1></body></html>";
        let meta = extract_meta(body);
        assert_eq!(meta.h1.as_deref(), Some("Hi"));
        assert_eq!(meta.title.as_deref(), Some("T"));
        assert_eq!(meta.description.as_deref(), Some("D"));
    }

    #[test]
    fn missing_elements_stay_absent() {
        let meta =
            extract_meta(b"<html><head><title>Err</title></head><body></body></html>");
        assert_eq!(meta.title.as_deref(), Some("Err"));
        assert_eq!(meta.h1, None);
        assert_eq!(meta.description, None);
    }

    #[test]
    fn takes_the_first_h1() {
        let meta = extract_meta(b"<body><h1>First</h1><h1>Second</h1></body>");
        assert_eq!(meta.h1.as_deref(), Some("First"));
    }

    #[test]
    fn whitespace_only_elements_stay_absent() {
        let meta = extract_meta(b"<body><h1>   </h1></body>");
        assert_eq!(meta.h1, None);
    }

    #[test]
    fn element_text_is_trimmed() {
        let meta = extract_meta(b"<head><title>\n  Spaced out  \n</title></head>");
        assert_eq!(meta.title.as_deref(), Some("Spaced out"));
    }

    #[test]
    fn overlong_title_is_clipped_to_column_width() {
        let body = format!("<head><title>{}</title></head>", "x".repeat(400));
        let meta = extract_meta(body.as_bytes());
        assert_eq!(meta.title.unwrap().chars().count(), 255);
    }

    #[test]
    fn empty_body_yields_nothing() {
        assert_eq!(extract_meta(b""), PageMeta::default());
    }

    #[test]
    fn undecodable_body_yields_nothing() {
        assert_eq!(extract_meta(&[0x9f, 0x92, 0x96]), PageMeta::default());
    }
}
