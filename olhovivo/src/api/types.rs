//! Olho Vivo API response DTOs.
//!
//! These types map directly to the JSON the API returns. The search
//! endpoints use long Portuguese keys (`CodigoLinha`); the real-time
//! endpoints use one- or two-letter keys (`hr`, `vs`, `p`). Every key is
//! required unless noted: a missing key is a malformed response, not a
//! default.

use std::fmt;

use serde::Deserialize;

/// An identifier the API sends as either a JSON string or a number,
/// depending on the endpoint and API version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Text(String),
    Number(i64),
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Text(s) => f.write_str(s),
            Code::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Entry of `Linha/Buscar`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineDto {
    #[serde(rename = "CodigoLinha")]
    pub code: Code,

    #[serde(rename = "Circular")]
    pub circular: bool,

    /// Sign code, e.g. "8000".
    #[serde(rename = "Letreiro")]
    pub sign: Code,

    /// 1 = outbound, 2 = inbound.
    #[serde(rename = "Sentido")]
    pub direction: i64,

    /// 10, 21, 31 or 41.
    #[serde(rename = "Tipo")]
    pub line_type: i64,

    /// Name shown outbound (main terminal to secondary).
    #[serde(rename = "DenominacaoTPTS")]
    pub name_forward: String,

    /// Name shown inbound (secondary terminal to main).
    #[serde(rename = "DenominacaoTSTP")]
    pub name_back: String,

    /// Optional extra information; often null.
    #[serde(rename = "Informacoes", default)]
    pub info: Option<String>,
}

/// Entry of `Parada/Buscar` and the per-line/per-busway stop searches.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    #[serde(rename = "CodigoParada")]
    pub code: Code,

    #[serde(rename = "Nome")]
    pub name: String,

    #[serde(rename = "Endereco")]
    pub address: String,

    #[serde(rename = "Latitude")]
    pub latitude: f64,

    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// Entry of `Corredor`.
#[derive(Debug, Clone, Deserialize)]
pub struct BuswayDto {
    #[serde(rename = "CodCorredor")]
    pub code: Code,

    #[serde(rename = "Nome")]
    pub name: String,
}

/// A vehicle position, as found in `Posicao`.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleDto {
    /// Vehicle id.
    pub p: Code,
    /// Accessible.
    pub a: bool,
    /// Latitude.
    pub py: f64,
    /// Longitude.
    pub px: f64,
}

/// A vehicle with its predicted arrival, as found in the `Previsao*` payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleForecastDto {
    pub p: Code,
    /// Predicted arrival, "HH:MM".
    pub t: String,
    pub a: bool,
    pub py: f64,
    pub px: f64,
}

/// Response of `Posicao`.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionsDto {
    /// Issue time, "HH:MM".
    pub hr: String,
    pub vs: Vec<VehicleDto>,
}

/// A line and its approaching vehicles, inside a stop forecast.
#[derive(Debug, Clone, Deserialize)]
pub struct LineArrivalsDto {
    /// Compound sign code, e.g. "8000-10".
    pub c: String,
    /// Line code.
    pub cl: Code,
    /// Direction.
    pub sl: i64,
    /// Name shown outbound.
    pub lt0: String,
    /// Name shown inbound.
    pub lt1: String,
    pub vs: Vec<VehicleForecastDto>,
}

/// The stop section of `Previsao` and `Previsao/Parada`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopArrivalsDto {
    pub l: Vec<LineArrivalsDto>,
}

/// Response of `Previsao` and `Previsao/Parada`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopForecastDto {
    pub hr: String,
    pub p: StopArrivalsDto,
}

/// A stop and the vehicles approaching it, inside a line forecast.
#[derive(Debug, Clone, Deserialize)]
pub struct StopOnLineDto {
    /// Stop code.
    pub cp: Code,
    /// Stop name.
    pub np: String,
    pub py: f64,
    pub px: f64,
    pub vs: Vec<VehicleForecastDto>,
}

/// Response of `Previsao/Linha`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineForecastDto {
    pub hr: String,
    pub ps: Vec<StopOnLineDto>,
}

/// A company entry of `Empresa`.
///
/// Entries repeat their group's area as `a`; the group's value is the one
/// used, so it is not decoded here.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyDto {
    /// Company code.
    pub c: Code,
    /// Company name.
    pub n: String,
}

/// Companies grouped by area, in `Empresa`.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaCompaniesDto {
    /// Operating area.
    pub a: u8,
    pub e: Vec<CompanyDto>,
}

/// Response of `Empresa`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompaniesDto {
    pub hr: String,
    pub e: Vec<AreaCompaniesDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_accepts_string_or_number() {
        let text: Code = serde_json::from_value(json!("12345")).unwrap();
        let number: Code = serde_json::from_value(json!(12345)).unwrap();
        assert_eq!(text.to_string(), "12345");
        assert_eq!(number.to_string(), "12345");
        assert!(serde_json::from_value::<Code>(json!(null)).is_err());
    }

    #[test]
    fn line_info_is_optional() {
        let line: LineDto = serde_json::from_value(json!({
            "CodigoLinha": 1273,
            "Circular": false,
            "Letreiro": "8000",
            "Sentido": 1,
            "Tipo": 10,
            "DenominacaoTPTS": "PCA.RAMOS DE AZEVEDO",
            "DenominacaoTSTP": "TERMINAL LAPA",
            "Informacoes": null
        }))
        .unwrap();
        assert_eq!(line.info, None);
        assert_eq!(line.code, Code::Number(1273));
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = serde_json::from_value::<PositionsDto>(json!({"hr": "10:00"})).unwrap_err();
        assert!(err.to_string().contains("missing field `vs`"));
    }
}
