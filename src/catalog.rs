//! Endpoint catalog.
//!
//! One static table drives URL construction, caller validation and
//! cache-key construction for every endpoint. Each entry records the path
//! template, the query parameters the endpoint recognizes (and which of
//! them are required), the cache-key rule, and the response format.

use crate::cache::key;
use crate::error::Error;
use crate::request::{HttpMethod, Params, ResponseFormat};
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use url::Url;

/// One logical API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    SearchCompanies,
    SearchOfficers,
    SearchDisqualifiedOfficers,
    AlphabeticalSearchCompanies,
    DissolvedSearchCompanies,
    AdvancedSearchCompanies,
    CompanyProfile,
    RegisteredOfficeAddress,
    CompanyOfficers,
    OfficerAppointment,
    FilingHistory,
    FilingHistoryItem,
    Charges,
    ChargeDetails,
    Insolvency,
    Exemptions,
    Registers,
    UkEstablishments,
    PscList,
    PscStatements,
    PscIndividual,
    PscCorporate,
    PscLegalPerson,
    PscSuperSecure,
    OfficerAppointments,
    DisqualifiedNaturalOfficer,
    DisqualifiedCorporateOfficer,
    DocumentMetadata,
    DocumentContent,
}

/// How the cache key for an endpoint is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Prefix + the literal path identifiers, joined with `_`.
    Identifiers,
    /// Prefix + the literal value of the named query parameter.
    QueryLiteral(&'static str),
    /// Prefix + stable hash of the canonicalized parameter map.
    HashedParams,
}

/// Static description of one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointDef {
    pub endpoint: Endpoint,
    /// Path template relative to the base URL; `{name}` segments are
    /// substituted with caller identifiers in order.
    pub path: &'static str,
    pub method: HttpMethod,
    /// Query parameter names the endpoint recognizes.
    pub query_params: &'static [&'static str],
    /// Subset of `query_params` that must be present and non-empty.
    pub required_query: &'static [&'static str],
    pub cache_prefix: &'static str,
    pub key_style: KeyStyle,
    pub format: ResponseFormat,
    /// Accept header override; `None` means the default `application/json`.
    pub accept: Option<&'static str>,
}

macro_rules! endpoint {
    ($endpoint:expr, $path:literal, $prefix:literal, $style:expr) => {
        endpoint!($endpoint, $path, $prefix, $style, &[], &[])
    };
    ($endpoint:expr, $path:literal, $prefix:literal, $style:expr, $query:expr, $required:expr) => {
        EndpointDef {
            endpoint: $endpoint,
            path: $path,
            method: HttpMethod::Get,
            query_params: $query,
            required_query: $required,
            cache_prefix: $prefix,
            key_style: $style,
            format: ResponseFormat::Json,
            accept: None,
        }
    };
}

static DEFS: &[EndpointDef] = &[
    endpoint!(
        Endpoint::Search,
        "/search",
        "search_",
        KeyStyle::HashedParams,
        &["q", "items_per_page", "start_index"],
        &["q"]
    ),
    endpoint!(
        Endpoint::SearchCompanies,
        "/search/companies",
        "search_companies_",
        KeyStyle::QueryLiteral("q"),
        &["q", "items_per_page", "start_index"],
        &["q"]
    ),
    endpoint!(
        Endpoint::SearchOfficers,
        "/search/officers",
        "search_officers_",
        KeyStyle::QueryLiteral("q"),
        &["q", "items_per_page", "start_index"],
        &["q"]
    ),
    endpoint!(
        Endpoint::SearchDisqualifiedOfficers,
        "/search/disqualified-officers",
        "search_disqualified_",
        KeyStyle::QueryLiteral("q"),
        &["q", "items_per_page", "start_index"],
        &["q"]
    ),
    endpoint!(
        Endpoint::AlphabeticalSearchCompanies,
        "/alphabetical-search/companies",
        "search_alpha_",
        KeyStyle::QueryLiteral("q"),
        &["q", "search_above", "search_below", "size"],
        &["q"]
    ),
    endpoint!(
        Endpoint::DissolvedSearchCompanies,
        "/dissolved-search/companies",
        "search_dissolved_",
        KeyStyle::QueryLiteral("q"),
        &["q", "search_type", "start_index"],
        &["q"]
    ),
    endpoint!(
        Endpoint::AdvancedSearchCompanies,
        "/advanced-search/companies",
        "advanced_",
        KeyStyle::HashedParams,
        &[
            "company_name_includes",
            "location",
            "incorporated_from",
            "incorporated_to",
            "company_status",
            "sic_codes"
        ],
        &[]
    ),
    endpoint!(
        Endpoint::CompanyProfile,
        "/company/{company_number}",
        "company_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::RegisteredOfficeAddress,
        "/company/{company_number}/registered-office-address",
        "company_office_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::CompanyOfficers,
        "/company/{company_number}/officers",
        "company_officers_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::OfficerAppointment,
        "/company/{company_number}/appointments/{appointment_id}",
        "officer_appointment_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::FilingHistory,
        "/company/{company_number}/filing-history",
        "filing_history_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::FilingHistoryItem,
        "/company/{company_number}/filing-history/{transaction_id}",
        "filing_item_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::Charges,
        "/company/{company_number}/charges",
        "charges_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::ChargeDetails,
        "/company/{company_number}/charges/{charge_id}",
        "charge_detail_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::Insolvency,
        "/company/{company_number}/insolvency",
        "insolvency_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::Exemptions,
        "/company/{company_number}/exemptions",
        "exemptions_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::Registers,
        "/company/{company_number}/registers",
        "registers_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::UkEstablishments,
        "/company/{company_number}/uk-establishments",
        "uk_establishments_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::PscList,
        "/company/{company_number}/persons-with-significant-control",
        "psc_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::PscStatements,
        "/company/{company_number}/persons-with-significant-control-statements",
        "psc_statements_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::PscIndividual,
        "/company/{company_number}/persons-with-significant-control/individual/{psc_id}",
        "psc_individual_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::PscCorporate,
        "/company/{company_number}/persons-with-significant-control/corporate-entity/{psc_id}",
        "psc_corporate_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::PscLegalPerson,
        "/company/{company_number}/persons-with-significant-control/legal-person/{psc_id}",
        "psc_legal_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::PscSuperSecure,
        "/company/{company_number}/persons-with-significant-control/super-secure/{super_secure_id}",
        "psc_secure_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::OfficerAppointments,
        "/officers/{officer_id}/appointments",
        "officer_appointments_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::DisqualifiedNaturalOfficer,
        "/disqualified-officers/natural/{officer_id}",
        "disqualified_natural_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::DisqualifiedCorporateOfficer,
        "/disqualified-officers/corporate/{officer_id}",
        "disqualified_corporate_",
        KeyStyle::Identifiers
    ),
    endpoint!(
        Endpoint::DocumentMetadata,
        "/document/{document_id}",
        "document_metadata_",
        KeyStyle::Identifiers
    ),
    EndpointDef {
        endpoint: Endpoint::DocumentContent,
        path: "/document/{document_id}/content",
        method: HttpMethod::Get,
        query_params: &[],
        required_query: &[],
        cache_prefix: "document_pdf_",
        key_style: KeyStyle::Identifiers,
        format: ResponseFormat::Binary,
        accept: Some("application/pdf"),
    },
];

static CATALOG: Lazy<HashMap<Endpoint, &'static EndpointDef>> =
    Lazy::new(|| DEFS.iter().map(|def| (def.endpoint, def)).collect());

/// Look up the definition for an endpoint.
pub fn def(endpoint: Endpoint) -> &'static EndpointDef {
    CATALOG[&endpoint]
}

impl EndpointDef {
    /// Number of `{name}` placeholders in the path template.
    pub fn placeholder_count(&self) -> usize {
        self.path
            .split('/')
            .filter(|seg| seg.starts_with('{') && seg.ends_with('}'))
            .count()
    }

    /// Substitute `ids` into the path template under `base`, applying
    /// standard path-segment encoding to each identifier.
    pub fn build_url(&self, base: &Url, ids: &[&str]) -> Result<Url> {
        let expected = self.placeholder_count();
        if ids.len() != expected {
            return Err(Error::validation(format!(
                "endpoint {} takes {} identifier(s), got {}",
                self.path,
                expected,
                ids.len()
            )));
        }

        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::validation("base URL cannot be a base"))?;
            segments.pop_if_empty();
            let mut next_id = ids.iter();
            for segment in self.path.trim_start_matches('/').split('/') {
                if segment.starts_with('{') && segment.ends_with('}') {
                    // Checked above: placeholder count matches ids.len().
                    let id = next_id.next().copied().unwrap_or_default();
                    segments.push(id);
                } else {
                    segments.push(segment);
                }
            }
        }
        Ok(url)
    }

    /// Reject missing/empty required query parameters and empty
    /// identifiers before any network access.
    pub fn validate(&self, ids: &[&str], params: &Params) -> Result<()> {
        for id in ids {
            if id.is_empty() {
                return Err(Error::validation(format!(
                    "endpoint {} requires a non-empty identifier",
                    self.path
                )));
            }
        }
        for name in self.required_query {
            let present = params.get(*name).map(|v| !v.is_empty()).unwrap_or(false);
            if !present {
                return Err(Error::validation(format!(
                    "query parameter \"{}\" is required for {}",
                    name, self.path
                )));
            }
        }
        Ok(())
    }

    /// Cache key for one call instance.
    pub fn cache_key(&self, ids: &[&str], params: &Params) -> String {
        match self.key_style {
            KeyStyle::Identifiers => key::scalar(self.cache_prefix, ids),
            KeyStyle::QueryLiteral(name) => {
                let literal = params
                    .get(name)
                    .and_then(|v| v.as_scalar())
                    .unwrap_or_default();
                key::scalar(self.cache_prefix, &[literal])
            }
            KeyStyle::HashedParams => key::hashed(self.cache_prefix, params),
        }
    }
}
