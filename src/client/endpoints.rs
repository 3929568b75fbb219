//! Typed endpoint methods.
//!
//! Each method is a thin instantiation of [`CompaniesHouseClient::call`]
//! with a different entry from the endpoint catalog; all control flow
//! lives in the generic dispatch and the caching gateway.

use crate::catalog::Endpoint;
use crate::client::core::CompaniesHouseClient;
use crate::request::Params;
use crate::Result;
use bytes::Bytes;
use serde_json::Value;

fn query(q: &str) -> Params {
    let mut params = Params::new();
    params.insert("q".into(), q.into());
    params
}

impl CompaniesHouseClient {
    /// Search across companies, officers and disqualified officers.
    /// Requires a non-empty `q` parameter.
    pub async fn search(&self, params: Params) -> Result<Value> {
        self.execute_json(Endpoint::Search, &[], params, None).await
    }

    /// Search for companies by name or number.
    pub async fn search_companies(&self, q: &str) -> Result<Value> {
        self.execute_json(Endpoint::SearchCompanies, &[], query(q), None)
            .await
    }

    /// Search for company officers by name.
    pub async fn search_officers(&self, q: &str) -> Result<Value> {
        self.execute_json(Endpoint::SearchOfficers, &[], query(q), None)
            .await
    }

    /// Search for disqualified officers.
    pub async fn search_disqualified_officers(&self, q: &str) -> Result<Value> {
        self.execute_json(Endpoint::SearchDisqualifiedOfficers, &[], query(q), None)
            .await
    }

    /// Search companies alphabetically.
    pub async fn alphabetical_search_companies(&self, q: &str) -> Result<Value> {
        self.execute_json(Endpoint::AlphabeticalSearchCompanies, &[], query(q), None)
            .await
    }

    /// Search for dissolved companies.
    pub async fn dissolved_search_companies(&self, q: &str) -> Result<Value> {
        self.execute_json(Endpoint::DissolvedSearchCompanies, &[], query(q), None)
            .await
    }

    /// Advanced company search with filters (name, location, incorporation
    /// dates, status, SIC codes).
    pub async fn advanced_search(&self, filters: Params) -> Result<Value> {
        self.execute_json(Endpoint::AdvancedSearchCompanies, &[], filters, None)
            .await
    }

    /// Retrieve the company profile.
    pub async fn get_company(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::CompanyProfile, &[company_number], Params::new(), None)
            .await
    }

    /// Get the registered office address.
    pub async fn get_registered_office(&self, company_number: &str) -> Result<Value> {
        self.execute_json(
            Endpoint::RegisteredOfficeAddress,
            &[company_number],
            Params::new(),
            None,
        )
        .await
    }

    /// List company officers.
    pub async fn get_company_officers(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::CompanyOfficers, &[company_number], Params::new(), None)
            .await
    }

    /// Get details of a specific officer appointment.
    pub async fn get_officer_appointment(
        &self,
        company_number: &str,
        appointment_id: &str,
    ) -> Result<Value> {
        self.execute_json(
            Endpoint::OfficerAppointment,
            &[company_number, appointment_id],
            Params::new(),
            None,
        )
        .await
    }

    /// List the company's filing history.
    pub async fn get_filing_history(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::FilingHistory, &[company_number], Params::new(), None)
            .await
    }

    /// Retrieve a specific filing history item.
    pub async fn get_filing_history_item(
        &self,
        company_number: &str,
        transaction_id: &str,
    ) -> Result<Value> {
        self.execute_json(
            Endpoint::FilingHistoryItem,
            &[company_number, transaction_id],
            Params::new(),
            None,
        )
        .await
    }

    /// List charges (mortgages) registered against the company.
    pub async fn get_charges(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::Charges, &[company_number], Params::new(), None)
            .await
    }

    /// Get details of a specific charge.
    pub async fn get_charge_details(
        &self,
        company_number: &str,
        charge_id: &str,
    ) -> Result<Value> {
        self.execute_json(
            Endpoint::ChargeDetails,
            &[company_number, charge_id],
            Params::new(),
            None,
        )
        .await
    }

    /// Retrieve insolvency information.
    pub async fn get_insolvency(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::Insolvency, &[company_number], Params::new(), None)
            .await
    }

    /// Get information on company exemptions.
    pub async fn get_exemptions(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::Exemptions, &[company_number], Params::new(), None)
            .await
    }

    /// Access the company's statutory registers.
    pub async fn get_registers(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::Registers, &[company_number], Params::new(), None)
            .await
    }

    /// List UK establishments associated with the company.
    pub async fn get_uk_establishments(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::UkEstablishments, &[company_number], Params::new(), None)
            .await
    }

    /// List persons with significant control (PSC).
    pub async fn get_psc_list(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::PscList, &[company_number], Params::new(), None)
            .await
    }

    /// List PSC statements.
    pub async fn get_psc_statements(&self, company_number: &str) -> Result<Value> {
        self.execute_json(Endpoint::PscStatements, &[company_number], Params::new(), None)
            .await
    }

    /// Get details of an individual PSC.
    pub async fn get_individual_psc(&self, company_number: &str, psc_id: &str) -> Result<Value> {
        self.execute_json(
            Endpoint::PscIndividual,
            &[company_number, psc_id],
            Params::new(),
            None,
        )
        .await
    }

    /// Get details of a corporate PSC.
    pub async fn get_corporate_psc(&self, company_number: &str, psc_id: &str) -> Result<Value> {
        self.execute_json(
            Endpoint::PscCorporate,
            &[company_number, psc_id],
            Params::new(),
            None,
        )
        .await
    }

    /// Get details of a legal person PSC.
    pub async fn get_legal_person_psc(&self, company_number: &str, psc_id: &str) -> Result<Value> {
        self.execute_json(
            Endpoint::PscLegalPerson,
            &[company_number, psc_id],
            Params::new(),
            None,
        )
        .await
    }

    /// Get details of a super secure PSC.
    pub async fn get_super_secure_psc(
        &self,
        company_number: &str,
        super_secure_id: &str,
    ) -> Result<Value> {
        self.execute_json(
            Endpoint::PscSuperSecure,
            &[company_number, super_secure_id],
            Params::new(),
            None,
        )
        .await
    }

    /// List appointments for a specific officer.
    pub async fn get_officer_appointments(&self, officer_id: &str) -> Result<Value> {
        self.execute_json(
            Endpoint::OfficerAppointments,
            &[officer_id],
            Params::new(),
            None,
        )
        .await
    }

    /// Get details of a disqualified natural person.
    pub async fn get_disqualified_natural_officer(&self, officer_id: &str) -> Result<Value> {
        self.execute_json(
            Endpoint::DisqualifiedNaturalOfficer,
            &[officer_id],
            Params::new(),
            None,
        )
        .await
    }

    /// Get details of a disqualified corporate officer.
    pub async fn get_disqualified_corporate_officer(&self, officer_id: &str) -> Result<Value> {
        self.execute_json(
            Endpoint::DisqualifiedCorporateOfficer,
            &[officer_id],
            Params::new(),
            None,
        )
        .await
    }

    /// Retrieve metadata for a document.
    pub async fn get_document_metadata(&self, document_id: &str) -> Result<Value> {
        self.execute_json(Endpoint::DocumentMetadata, &[document_id], Params::new(), None)
            .await
    }

    /// Download the document content (`Accept: application/pdf`).
    pub async fn download_document(&self, document_id: &str) -> Result<Bytes> {
        let payload = self
            .call(Endpoint::DocumentContent, &[document_id], Params::new(), None)
            .await?;
        Ok(payload.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_helper_builds_a_single_q_param() {
        let params = query("tesco");
        assert_eq!(params.len(), 1);
        assert_eq!(params["q"].as_scalar(), Some("tesco"));
    }
}
