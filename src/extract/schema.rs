//! Declarative extraction schema
//!
//! A site is an ordered list of [`FieldSpec`]s. Each spec names the page
//! field it fills, the selector that locates the raw value, and a named
//! post-processing [`Transform`].

use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::constants::{RESERVED_TWITTER_PATHS, TWITTER_PROFILE_PREFIX};

lazy_static! {
    static ref CREATOR_HREF: Regex = Regex::new(r"/([^/]+)/address/([^/?#]+)").expect("valid regex");
    static ref TWITTER_HREF: Regex = Regex::new(r"(?:twitter|x)\.com/([^/?#]+)").expect("valid regex");
}

/// Page field a `FieldSpec` fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    Content,
    Contract,
    Creator,
    Twitter,
}

impl FieldId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Content => "content",
            FieldId::Contract => "contract",
            FieldId::Creator => "creator",
            FieldId::Twitter => "twitter",
        }
    }
}

/// How a raw value is located on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Text content of the first node matching the XPath
    Text(&'static str),
    /// Attribute of the first element matching the XPath
    Attribute { xpath: &'static str, attr: &'static str },
}

impl Selector {
    pub fn xpath(&self) -> &'static str {
        match self {
            Selector::Text(xpath) => *xpath,
            Selector::Attribute { xpath, .. } => *xpath,
        }
    }

    /// Stable key, `xpath` or `xpath@attr`
    pub fn key(&self) -> String {
        match self {
            Selector::Text(xpath) => xpath.to_string(),
            Selector::Attribute { xpath, attr } => format!("{}@{}", xpath, attr),
        }
    }
}

/// Named post-processing step, `None` means the field was not found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Trim,
    /// `/<chain>/address/<address>` link → `chain:address`
    CreatorFromHref,
    /// Profile link → `https://x.com/<handle>`
    TwitterFromHref,
    /// Image URL → file name without extension
    AddressFromImageSrc,
}

pub const TRANSFORMS: [Transform; 4] = [
    Transform::Trim,
    Transform::CreatorFromHref,
    Transform::TwitterFromHref,
    Transform::AddressFromImageSrc,
];

impl Transform {
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Trim => "trim",
            Transform::CreatorFromHref => "creator_from_href",
            Transform::TwitterFromHref => "twitter_from_href",
            Transform::AddressFromImageSrc => "address_from_image_src",
        }
    }

    pub fn by_name(name: &str) -> Option<Transform> {
        TRANSFORMS.into_iter().find(|t| t.name() == name)
    }

    pub fn apply(&self, raw: &str) -> Option<String> {
        match self {
            Transform::Trim => non_empty(raw.trim()),
            Transform::CreatorFromHref => CREATOR_HREF
                .captures(raw)
                .map(|caps| format!("{}:{}", &caps[1], &caps[2])),
            Transform::TwitterFromHref => twitter_from_href(raw),
            Transform::AddressFromImageSrc => {
                let file = raw.trim().rsplit('/').next()?;
                non_empty(file.split('.').next().unwrap_or_default())
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Handle is percent-decoded, a handle that is not valid UTF-8 once decoded
/// counts as not found
fn twitter_from_href(raw: &str) -> Option<String> {
    let href = raw.trim().trim_start_matches('@');
    let captured = TWITTER_HREF.captures(href)?.get(1)?.as_str();
    let handle = percent_decode_str(captured).decode_utf8().ok()?;
    if RESERVED_TWITTER_PATHS.contains(&&*handle) {
        return None;
    }
    Some(format!("{}{}", TWITTER_PROFILE_PREFIX, handle))
}

/// One field of a site schema
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: FieldId,
    pub label: &'static str,
    pub selector: Selector,
    pub post: Transform,
}

/// Where a site exposes the token contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractSource {
    /// `/<chain>/token/<address>` in the page URL
    UrlPath,
    /// A `Contract` field, on a site with a single chain
    Field { chain: &'static str },
}

/// Hand-written extraction schema of one supported site
#[derive(Debug, Clone)]
pub struct SiteSchema {
    pub host: &'static str,
    pub contract: ContractSource,
    pub fields: Vec<FieldSpec>,
}

impl SiteSchema {
    /// `host` itself or any subdomain of it
    pub fn matches_host(&self, host: &str) -> bool {
        host == self.host
            || host
                .strip_suffix(self.host)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.field == id)
    }
}
