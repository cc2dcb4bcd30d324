//! Conversion from Olho Vivo payloads to domain types.
//!
//! Each endpoint returns its own shape. These functions decode the raw
//! JSON into the DTOs in [`types`](super::types) and then build validated
//! domain values, keeping the server's ordering throughout. They are pure:
//! converting the same `Value` twice gives equal results.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{
    ArrivalForecast, Bus, BusForecast, BusLine, BusLineFields, BusStop, Busway, ClockTime,
    Company, Coordinate, ForecastMode, ForecastSubject, LineReport, LineType, ValidationError,
};

use super::endpoint;
use super::error::MalformedResponse;
use super::types::{
    BuswayDto, CompaniesDto, LineArrivalsDto, LineDto, LineForecastDto, PositionsDto,
    StopDto, StopForecastDto, VehicleDto, VehicleForecastDto,
};

/// Error during payload to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Payload shape was wrong
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),

    /// Payload shape was right but a value failed validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, raw: &Value) -> Result<T, MalformedResponse> {
    T::deserialize(raw).map_err(|e| MalformedResponse::Shape {
        endpoint,
        message: e.to_string(),
    })
}

/// Convert a `Linha/Buscar` response.
pub fn convert_lines(raw: &Value) -> Result<Vec<BusLine>, ConversionError> {
    let lines: Vec<LineDto> = decode(endpoint::LINE_SEARCH, raw)?;

    lines
        .iter()
        .map(|dto| {
            let code = dto.code.to_string();
            let sign = dto.sign.to_string();
            let line = BusLine::new(BusLineFields {
                code: &code,
                circular: dto.circular,
                sign: &sign,
                direction: dto.direction,
                line_type: dto.line_type,
                name_forward: &dto.name_forward,
                name_back: &dto.name_back,
                info: dto.info.as_deref().unwrap_or_default(),
            })?;
            Ok(line)
        })
        .collect()
}

/// Convert any of the stop search responses.
///
/// `endpoint` only labels errors; all three stop searches share a shape.
pub fn convert_stops(endpoint: &'static str, raw: &Value) -> Result<Vec<BusStop>, ConversionError> {
    let stops: Vec<StopDto> = decode(endpoint, raw)?;

    stops
        .iter()
        .map(|dto| {
            let coordinate = Coordinate::labelled(dto.latitude, dto.longitude, &dto.name)?;
            let stop = BusStop::new(dto.code.to_string(), &dto.name)?
                .with_address(&dto.address)
                .with_coordinate(coordinate);
            Ok(stop)
        })
        .collect()
}

/// Convert a `Corredor` response.
pub fn convert_busways(raw: &Value) -> Result<Vec<Busway>, ConversionError> {
    let busways: Vec<BuswayDto> = decode(endpoint::BUSWAYS, raw)?;

    busways
        .iter()
        .map(|dto| Ok(Busway::new(dto.code.to_string(), &dto.name)?))
        .collect()
}

/// Convert a `Posicao` response.
pub fn convert_line_report(raw: &Value) -> Result<LineReport, ConversionError> {
    let dto: PositionsDto = decode(endpoint::POSITIONS, raw)?;

    let issued_at = ClockTime::parse(&dto.hr)?;
    let buses = dto
        .vs
        .iter()
        .map(vehicle_to_bus)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LineReport::new(issued_at, buses))
}

/// Convert a `Previsao` response (one line at one stop).
///
/// Every line group in the payload is filed under `line`, since the
/// endpoint is already filtered to it.
pub fn convert_line_at_stop_forecast(
    raw: &Value,
    line: &BusLine,
) -> Result<ArrivalForecast, ConversionError> {
    let dto: StopForecastDto = decode(endpoint::FORECAST, raw)?;

    let issued_at = ClockTime::parse(&dto.hr)?;
    let mut arrivals = Vec::new();
    for group in &dto.p.l {
        arrivals.extend(convert_arrivals(&group.vs)?);
    }

    let entries = vec![(ForecastSubject::Line(line.clone()), arrivals)];
    Ok(ArrivalForecast::new(issued_at, ForecastMode::ByLine, entries)?)
}

/// Convert a `Previsao/Linha` response: one line, keyed by stop.
pub fn convert_line_forecast(raw: &Value) -> Result<ArrivalForecast, ConversionError> {
    let dto: LineForecastDto = decode(endpoint::FORECAST_BY_LINE, raw)?;

    let issued_at = ClockTime::parse(&dto.hr)?;
    let entries = dto
        .ps
        .iter()
        .map(|stop| {
            let coordinate = Coordinate::labelled(stop.py, stop.px, &stop.np)?;
            let subject = BusStop::new(stop.cp.to_string(), &stop.np)?.with_coordinate(coordinate);
            Ok((ForecastSubject::Stop(subject), convert_arrivals(&stop.vs)?))
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(ArrivalForecast::new(issued_at, ForecastMode::ByStop, entries)?)
}

/// Convert a `Previsao/Parada` response: one stop, keyed by line.
pub fn convert_stop_forecast(raw: &Value) -> Result<ArrivalForecast, ConversionError> {
    let dto: StopForecastDto = decode(endpoint::FORECAST_BY_STOP, raw)?;

    let issued_at = ClockTime::parse(&dto.hr)?;
    let entries = dto
        .p
        .l
        .iter()
        .map(|group| {
            let line = forecast_line(group)?;
            Ok((ForecastSubject::Line(line), convert_arrivals(&group.vs)?))
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(ArrivalForecast::new(issued_at, ForecastMode::ByLine, entries)?)
}

/// Convert an `Empresa` response, flattening the per-area grouping.
pub fn convert_companies(raw: &Value) -> Result<Vec<Company>, ConversionError> {
    let dto: CompaniesDto = decode(endpoint::COMPANIES, raw)?;

    // The issue time is validated even though only the companies are kept
    ClockTime::parse(&dto.hr)?;

    dto.e
        .iter()
        .flat_map(|group| group.e.iter().map(move |c| (group.a, c)))
        .map(|(area, c)| Ok(Company::new(Some(area), c.c.to_string(), &c.n)?))
        .collect()
}

/// Build a `Bus`. All mapping paths go through here or
/// [`forecast_to_bus`], so the color is always derived the same way.
fn vehicle_to_bus(v: &VehicleDto) -> Result<Bus, ValidationError> {
    Bus::parse(&v.p.to_string(), v.a, Coordinate::new(v.py, v.px)?)
}

fn forecast_to_bus(v: &VehicleForecastDto) -> Result<Bus, ValidationError> {
    Bus::parse(&v.p.to_string(), v.a, Coordinate::new(v.py, v.px)?)
}

fn convert_arrivals(vehicles: &[VehicleForecastDto]) -> Result<Vec<BusForecast>, ValidationError> {
    vehicles
        .iter()
        .map(|v| BusForecast::parse(&v.t, forecast_to_bus(v)?))
        .collect()
}

/// Rebuild a line from a forecast group.
///
/// Forecasts only carry the compound code "SSSS-TT"; circularity and extra
/// info are not reported, so the line is taken as non-circular.
fn forecast_line(group: &LineArrivalsDto) -> Result<BusLine, ValidationError> {
    let (sign, suffix) = group.c.split_once('-').ok_or_else(|| {
        ValidationError::new(
            "sign code",
            format!("expected SSSS-TT, got {:?}", group.c),
        )
    })?;
    if suffix.len() != 2 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new(
            "line type",
            format!("expected two digits after the dash, got {:?}", group.c),
        ));
    }
    let line_type = LineType::parse(suffix)?;
    let code = group.cl.to_string();

    BusLine::new(BusLineFields {
        code: &code,
        circular: false,
        sign,
        direction: group.sl,
        line_type: i64::from(line_type.code()),
        name_forward: &group.lt0,
        name_back: &group.lt1,
        info: "",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusColor, Direction};
    use serde_json::json;

    fn line() -> BusLine {
        BusLine::new(BusLineFields {
            code: "33887",
            circular: false,
            sign: "8000",
            direction: 2,
            line_type: 10,
            name_forward: "PCA.RAMOS DE AZEVEDO",
            name_back: "TERMINAL LAPA",
            info: "",
        })
        .unwrap()
    }

    fn lines_json() -> Value {
        json!([
            {
                "CodigoLinha": 33887,
                "Circular": false,
                "Letreiro": "8000",
                "Sentido": 2,
                "Tipo": 10,
                "DenominacaoTPTS": "PCA.RAMOS DE AZEVEDO",
                "DenominacaoTSTP": "TERMINAL LAPA",
                "Informacoes": null
            },
            {
                "CodigoLinha": 1273,
                "Circular": false,
                "Letreiro": "8000",
                "Sentido": 1,
                "Tipo": 10,
                "DenominacaoTPTS": "PCA.RAMOS DE AZEVEDO",
                "DenominacaoTSTP": "TERMINAL LAPA",
                "Informacoes": "Opera somente aos sabados"
            }
        ])
    }

    fn line_forecast_json() -> Value {
        json!({
            "hr": "20:09",
            "ps": [
                {
                    "cp": 4200953,
                    "np": "PARADA ROBERTO SELMI DEI B/C",
                    "py": -23.675901,
                    "px": -46.752812,
                    "vs": [
                        {"p": "74558", "t": "23:09", "a": true, "py": -23.67603, "px": -46.75891}
                    ]
                },
                {
                    "cp": 4200954,
                    "np": "PARADA ROBERTO SELMI DEI C/B",
                    "py": -23.676,
                    "px": -46.7529,
                    "vs": []
                }
            ]
        })
    }

    fn stop_forecast_json() -> Value {
        json!({
            "hr": "20:09",
            "p": {
                "cp": 4200953,
                "np": "PARADA ROBERTO SELMI DEI B/C",
                "py": -23.675901,
                "px": -46.752812,
                "l": [
                    {
                        "c": "7021-10",
                        "cl": 1989,
                        "sl": 1,
                        "lt0": "TERM. JOÃO DIAS",
                        "lt1": "JD. MARACÁ",
                        "qv": 1,
                        "vs": [
                            {"p": "74558", "t": "23:09", "a": true, "py": -23.67603, "px": -46.75891}
                        ]
                    },
                    {
                        "c": "N101-10",
                        "cl": 34041,
                        "sl": 2,
                        "lt0": "TERM. PQ. D. PEDRO II",
                        "lt1": "VILA MARIANA",
                        "qv": 0,
                        "vs": []
                    }
                ]
            }
        })
    }

    #[test]
    fn lines_in_order() {
        let lines = convert_lines(&lines_json()).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].code(), "33887");
        assert_eq!(lines[0].direction(), Direction::Inbound);
        assert_eq!(lines[0].info(), "");
        assert_eq!(lines[1].code(), "1273");
        assert_eq!(lines[1].info(), "Opera somente aos sabados");
    }

    #[test]
    fn invalid_line_field_is_validation_error() {
        let mut raw = lines_json();
        raw[0]["Sentido"] = json!(7);

        let err = convert_lines(&raw).unwrap_err();
        match err {
            ConversionError::Invalid(e) => assert_eq!(e.field(), "direction"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_line_key_is_malformed() {
        let mut raw = lines_json();
        raw[1].as_object_mut().unwrap().remove("Letreiro");

        assert!(matches!(
            convert_lines(&raw),
            Err(ConversionError::Malformed(MalformedResponse::Shape { endpoint: "Linha/Buscar", .. }))
        ));
    }

    #[test]
    fn expected_array_got_object() {
        let raw = json!({"CodigoLinha": 1});
        assert!(matches!(
            convert_lines(&raw),
            Err(ConversionError::Malformed(_))
        ));
    }

    #[test]
    fn stops_with_coordinates() {
        let raw = json!([
            {
                "CodigoParada": 340015329,
                "Nome": "AFONSO BRAZ B/C1",
                "Endereco": "R ARMINDA/ R BALTHAZAR DA VEIGA",
                "Latitude": -23.592938,
                "Longitude": -46.672727
            }
        ]);

        let stops = convert_stops(endpoint::STOP_SEARCH, &raw).unwrap();

        assert_eq!(stops.len(), 1);
        let stop = &stops[0];
        assert_eq!(stop.id(), "340015329");
        assert_eq!(stop.name(), "AFONSO BRAZ B/C1");
        assert_eq!(stop.address(), Some("R ARMINDA/ R BALTHAZAR DA VEIGA"));
        let coord = stop.coordinate().unwrap();
        assert_eq!(coord.latitude(), -23.592938);
        assert_eq!(coord.label(), Some("AFONSO BRAZ B/C1"));
    }

    #[test]
    fn stop_error_names_endpoint() {
        let raw = json!([{"CodigoParada": 1}]);
        let err = convert_stops(endpoint::STOPS_BY_BUSWAY, &raw).unwrap_err();
        assert!(err.to_string().contains("Parada/BuscarParadasPorCorredor"));
    }

    #[test]
    fn busways() {
        let raw = json!([
            {"CodCorredor": 8, "Nome": "Campo Limpo"},
            {"CodCorredor": 9, "Nome": "Expresso Tiradentes"}
        ]);

        let busways = convert_busways(&raw).unwrap();
        let names: Vec<_> = busways.iter().map(Busway::name).collect();
        assert_eq!(names, ["Campo Limpo", "Expresso Tiradentes"]);
        assert_eq!(busways[0].id(), "8");
    }

    #[test]
    fn line_report_roundtrip() {
        let raw = json!({
            "hr": "14:30",
            "vs": [{"p": "12345", "a": true, "py": -23.5, "px": -46.6}]
        });

        let report = convert_line_report(&raw).unwrap();

        assert_eq!(report.issued_at().as_str(), "14:30");
        assert_eq!(report.buses().len(), 1);
        let bus = &report.buses()[0];
        assert_eq!(bus.id().as_str(), "12345");
        assert!(bus.is_accessible());
        assert_eq!(bus.color(), BusColor::Green);
        assert_eq!(bus.position().longitude(), -46.6);
    }

    #[test]
    fn line_report_numeric_ids() {
        let raw = json!({
            "hr": "9:05",
            "vs": [
                {"p": 82001, "a": false, "py": -23.5, "px": -46.6},
                {"p": 41002, "a": true, "py": -23.6, "px": -46.7}
            ]
        });

        let report = convert_line_report(&raw).unwrap();
        let colors: Vec<_> = report.buses().iter().map(Bus::color).collect();
        assert_eq!(colors, [BusColor::Orange, BusColor::Red]);
    }

    #[test]
    fn line_report_empty() {
        let report = convert_line_report(&json!({"hr": "03:00", "vs": []})).unwrap();
        assert!(report.buses().is_empty());
    }

    #[test]
    fn line_report_bad_time() {
        let err = convert_line_report(&json!({"hr": "3:0", "vs": []})).unwrap_err();
        assert!(matches!(err, ConversionError::Invalid(_)));
    }

    #[test]
    fn line_report_bad_bus_id() {
        let raw = json!({"hr": "14:30", "vs": [{"p": "92345", "a": true, "py": -23.5, "px": -46.6}]});
        let err = convert_line_report(&raw).unwrap_err();
        match err {
            ConversionError::Invalid(e) => assert_eq!(e.field(), "bus id"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn line_report_missing_nested_key() {
        let raw = json!({"hr": "14:30", "vs": [{"p": "12345", "a": true, "py": -23.5}]});
        let err = convert_line_report(&raw).unwrap_err();
        assert!(err.to_string().contains("px"));
    }

    #[test]
    fn mapping_is_pure() {
        let raw = line_forecast_json();
        let first = convert_line_forecast(&raw).unwrap();
        let second = convert_line_forecast(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn line_forecast_is_keyed_by_stop() {
        let forecast = convert_line_forecast(&line_forecast_json()).unwrap();

        assert_eq!(forecast.mode(), ForecastMode::ByStop);
        assert_eq!(forecast.issued_at().as_str(), "20:09");
        assert_eq!(forecast.keys().collect::<Vec<_>>(), ["4200953", "4200954"]);

        let arrivals = forecast.get("4200953").unwrap();
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].time().as_str(), "23:09");
        assert_eq!(arrivals[0].bus().color(), BusColor::DarkRed);

        // Arrivals don't leak between stops
        assert!(forecast.get("4200954").unwrap().is_empty());

        let stop = forecast.subject("4200953").unwrap().as_stop().unwrap();
        assert_eq!(stop.name(), "PARADA ROBERTO SELMI DEI B/C");
    }

    #[test]
    fn unknown_line_type_suffix() {
        let mut raw = stop_forecast_json();
        raw["p"]["l"][1]["c"] = json!("N101-11");

        match convert_stop_forecast(&raw).unwrap_err() {
            ConversionError::Invalid(e) => assert_eq!(e.field(), "line type"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn stop_forecast_is_keyed_by_line() {
        let forecast = convert_stop_forecast(&stop_forecast_json()).unwrap();

        assert_eq!(forecast.mode(), ForecastMode::ByLine);
        assert_eq!(forecast.keys().collect::<Vec<_>>(), ["1989", "34041"]);

        let line = forecast.subject("1989").unwrap().as_line().unwrap();
        assert_eq!(line.full_sign_code(), "7021-10");
        assert_eq!(line.current_sign_name(), "TERM. JOÃO DIAS");
        assert!(!line.is_circular());

        let night = forecast.subject("34041").unwrap().as_line().unwrap();
        assert!(night.sign().is_night());
        assert_eq!(night.current_sign_name(), "VILA MARIANA");
        assert!(forecast.get("34041").unwrap().is_empty());
    }

    #[test]
    fn stop_forecast_bad_compound_code() {
        let mut raw = stop_forecast_json();
        raw["p"]["l"][0]["c"] = json!("702110");
        let err = convert_stop_forecast(&raw).unwrap_err();
        assert!(err.to_string().contains("sign code"));
    }

    #[test]
    fn line_type_suffix_must_be_two_digits() {
        for code in ["8000-+10", "8000-010", "8000-1", "8000- 10"] {
            let mut raw = stop_forecast_json();
            raw["p"]["l"][0]["c"] = json!(code);
            match convert_stop_forecast(&raw).unwrap_err() {
                ConversionError::Invalid(e) => assert_eq!(e.field(), "line type", "{code}"),
                other => panic!("expected validation error for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn stop_forecast_missing_stop_section() {
        let err = convert_stop_forecast(&json!({"hr": "20:09"})).unwrap_err();
        assert!(matches!(err, ConversionError::Malformed(_)));

        let err = convert_stop_forecast(&json!({"hr": "20:09", "p": null})).unwrap_err();
        assert!(matches!(err, ConversionError::Malformed(_)));
    }

    #[test]
    fn line_at_stop_forecast_merges_under_line() {
        let mut raw = stop_forecast_json();
        raw["p"]["l"][1]["vs"] = json!([
            {"p": "11111", "t": "23:15", "a": false, "py": -23.6, "px": -46.7}
        ]);

        let forecast = convert_line_at_stop_forecast(&raw, &line()).unwrap();

        assert_eq!(forecast.mode(), ForecastMode::ByLine);
        assert_eq!(forecast.len(), 1);
        let times: Vec<_> = forecast
            .get("33887")
            .unwrap()
            .iter()
            .map(|f| f.time().as_str())
            .collect();
        assert_eq!(times, ["23:09", "23:15"]);
    }

    #[test]
    fn forecast_time_must_have_two_digit_minutes() {
        let mut raw = line_forecast_json();
        raw["ps"][0]["vs"][0]["t"] = json!("9:5");
        assert!(matches!(
            convert_line_forecast(&raw),
            Err(ConversionError::Invalid(_))
        ));

        raw["ps"][0]["vs"][0]["t"] = json!("9:05");
        assert!(convert_line_forecast(&raw).is_ok());
    }

    #[test]
    fn companies_flattened_in_order() {
        let raw = json!({
            "hr": "11:20",
            "e": [
                {"a": 1, "e": [
                    {"a": 1, "c": 999, "n": "NOME"},
                    {"a": 1, "c": 998, "n": "OUTRO"}
                ]},
                {"a": 2, "e": [
                    {"a": 5, "c": "42", "n": "TERCEIRO"}
                ]}
            ]
        });

        let companies = convert_companies(&raw).unwrap();
        let ids: Vec<_> = companies.iter().map(Company::id).collect();
        assert_eq!(ids, ["999", "998", "42"]);
        assert_eq!(companies[0].area(), Some(1));
        // The group's area wins over the entry's own
        assert_eq!(companies[2].area(), Some(2));
    }

    #[test]
    fn company_entry_without_area() {
        let raw = json!({"hr": "11:20", "e": [{"a": 3, "e": [{"c": 7, "n": "SUL"}]}]});
        let companies = convert_companies(&raw).unwrap();
        assert_eq!(companies[0].area(), Some(3));
    }
}
