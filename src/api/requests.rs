//! Report request body and its metadata resolution.

use chrono::{DateTime, Locale, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::models::{ClientInfo, RawAuditReport, ReportMetadata, SiteInfo};
use crate::error::{AppError, Result};
use crate::service::naming::site_name_from_url;

/// Body accepted by both report endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub psi_data: Option<Value>,
    pub client_name: Option<String>,
    pub site_name: Option<String>,
    pub site_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Long Spanish (Mexico) date, e.g. `19 de octubre de 2026`.
pub fn report_date(now: DateTime<Utc>) -> String {
    now.format_localized("%-d de %B de %Y", Locale::es_MX).to_string()
}

impl ReportRequest {
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| AppError::validation(format!("request body is not valid JSON: {}", e)))
    }

    /// Decode `psiData.lighthouseResult`; its absence rejects the request.
    pub fn audit_report(&self) -> Result<RawAuditReport> {
        let psi_data = self
            .psi_data
            .as_ref()
            .filter(|v| v.is_object())
            .ok_or_else(|| AppError::validation("missing psiData"))?;

        let lighthouse_result = psi_data
            .get("lighthouseResult")
            .filter(|v| v.is_object())
            .ok_or_else(|| AppError::validation("missing psiData.lighthouseResult"))?;

        Ok(RawAuditReport::from(lighthouse_result))
    }

    pub fn metadata(&self, now: DateTime<Utc>) -> ReportMetadata {
        let site_url = non_blank(&self.site_url).unwrap_or_default().to_string();
        let site_name = non_blank(&self.site_name)
            .map(str::to_string)
            .unwrap_or_else(|| site_name_from_url(&site_url));
        let client_name = non_blank(&self.client_name)
            .map(str::to_string)
            .unwrap_or_else(|| site_name.clone());

        ReportMetadata {
            client: ClientInfo {
                name: client_name,
                email: non_blank(&self.email).unwrap_or_default().to_string(),
                phone: non_blank(&self.phone).unwrap_or_default().to_string(),
            },
            site: SiteInfo {
                name: site_name,
                url: site_url,
            },
            report_date: report_date(now),
            timestamp: now.timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 30, 0).unwrap()
    }

    #[test]
    fn formats_spanish_long_date() {
        assert_eq!(report_date(now()), "19 de octubre de 2026");
        let march = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(report_date(march), "5 de marzo de 2026");
    }

    #[test]
    fn rejects_non_json_body() {
        let err = ReportRequest::parse(b"psiData=1").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn requires_lighthouse_result() {
        let missing = ReportRequest::parse(br#"{"siteUrl":"https://a.com"}"#).unwrap();
        assert!(matches!(missing.audit_report(), Err(AppError::Validation(_))));

        let no_result = ReportRequest::parse(br#"{"psiData":{"id":"x"}}"#).unwrap();
        let err = no_result.audit_report().unwrap_err();
        assert!(err.to_string().contains("lighthouseResult"));

        let wrong_type = ReportRequest::parse(br#"{"psiData":{"lighthouseResult":[]}}"#).unwrap();
        assert!(wrong_type.audit_report().is_err());

        let ok = ReportRequest::parse(br#"{"psiData":{"lighthouseResult":{}}}"#).unwrap();
        assert_eq!(ok.audit_report().unwrap(), RawAuditReport::default());
    }

    #[test]
    fn metadata_falls_back_to_host_name() {
        let request: ReportRequest = serde_json::from_value(json!({
            "siteUrl": "https://www.panaderia.mx/inicio",
            "clientName": "  ",
            "email": "dueno@panaderia.mx"
        }))
        .unwrap();

        let meta = request.metadata(now());
        assert_eq!(meta.site.name, "panaderia.mx");
        assert_eq!(meta.site.url, "https://www.panaderia.mx/inicio");
        assert_eq!(meta.client.name, "panaderia.mx");
        assert_eq!(meta.client.email, "dueno@panaderia.mx");
        assert_eq!(meta.client.phone, "");
        assert_eq!(meta.timestamp, now().timestamp_millis());
    }

    #[test]
    fn metadata_prefers_explicit_names() {
        let request: ReportRequest = serde_json::from_value(json!({
            "siteUrl": "not a url",
            "siteName": "Panadería Luna",
            "clientName": "Luna S.A."
        }))
        .unwrap();

        let meta = request.metadata(now());
        assert_eq!(meta.site.name, "Panadería Luna");
        assert_eq!(meta.client.name, "Luna S.A.");

        let meta = ReportRequest::default().metadata(now());
        assert_eq!(meta.site.name, "website");
        assert_eq!(meta.site.url, "");
    }
}
