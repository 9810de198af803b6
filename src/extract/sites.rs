//! Supported sites
//!
//! - gmgn.ai: contract and chain come from the page URL
//!   (`/<chain>/token/<address>`), creator from the creator address link
//! - axiom.trade: Solana only, contract is the token image file name

use lazy_static::lazy_static;
use url::Url;

use crate::extract::schema::{ContractSource, FieldId, FieldSpec, Selector, SiteSchema, Transform};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::ContractRef;

pub const GMGN_HOST: &str = "gmgn.ai";
pub const AXIOM_HOST: &str = "axiom.trade";

/// Axiom only lists Solana tokens
pub const AXIOM_CHAIN: &str = "sol";

lazy_static! {
    /// Every site with an extraction schema
    pub static ref SITE_SCHEMAS: Vec<SiteSchema> = vec![gmgn(), axiom()];
}

fn gmgn() -> SiteSchema {
    SiteSchema {
        host: GMGN_HOST,
        contract: ContractSource::UrlPath,
        fields: vec![
            FieldSpec {
                field: FieldId::Content,
                label: "Token symbol",
                selector: Selector::Text("//div[contains(@class, 'css-1av451l')]/text()"),
                post: Transform::Trim,
            },
            FieldSpec {
                field: FieldId::Creator,
                label: "Contract creator",
                selector: Selector::Attribute {
                    xpath: "//a[contains(@href, '/address/') and .//div[contains(@class, 'css-1h8ua02')]]",
                    attr: "href",
                },
                post: Transform::CreatorFromHref,
            },
            FieldSpec {
                field: FieldId::Twitter,
                label: "Bound Twitter",
                selector: Selector::Attribute {
                    xpath: "//a[(.//div[@data-key='twitter'] or contains(@class, 'css-1wcebk6')) and (contains(@href, 'twitter.com/') or contains(@href, 'x.com/')) and not(contains(@href, '/search?'))]",
                    attr: "href",
                },
                post: Transform::TwitterFromHref,
            },
        ],
    }
}

fn axiom() -> SiteSchema {
    SiteSchema {
        host: AXIOM_HOST,
        contract: ContractSource::Field { chain: AXIOM_CHAIN },
        fields: vec![
            FieldSpec {
                field: FieldId::Content,
                label: "Token symbol",
                selector: Selector::Text(
                    "/html/body/div[3]/div/div/div/div/div[1]/div[1]/div/div[1]/div[2]/div/div[1]/div[2]/div[1]/span[1]",
                ),
                post: Transform::Trim,
            },
            FieldSpec {
                field: FieldId::Contract,
                label: "Contract address",
                selector: Selector::Attribute {
                    xpath: "/html/body/div[3]/div/div/div/div/div[1]/div[1]/div/div[1]/div[2]/div/div[1]/div[1]/div[2]/div/div/img",
                    attr: "src",
                },
                post: Transform::AddressFromImageSrc,
            },
            FieldSpec {
                field: FieldId::Twitter,
                label: "Bound Twitter",
                selector: Selector::Attribute {
                    xpath: "/html/body/div[3]/div/div/div/div/div[1]/div[1]/div/div[1]/div[2]/div/div[1]/div[2]/div[2]/span[2]/a",
                    attr: "href",
                },
                post: Transform::TwitterFromHref,
            },
        ],
    }
}

/// Schema for the site serving `page_url`
pub fn schema_for_url(page_url: &str) -> AppResult<&'static SiteSchema> {
    let url = Url::parse(page_url)?;
    let host = url.host_str().unwrap_or_default();
    SITE_SCHEMAS
        .iter()
        .find(|schema| schema.matches_host(host))
        .ok_or_else(|| AppError::unsupported_site(page_url))
}

/// Contract from a `/<chain>/token/<address>` page path
pub fn contract_from_path(url: &Url) -> Option<ContractRef> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        [chain, _, address, ..] if !chain.is_empty() && !address.is_empty() => Some(ContractRef {
            value: Some(address.to_string()),
            chain: Some(chain.to_string()),
        }),
        _ => None,
    }
}
