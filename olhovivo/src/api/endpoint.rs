//! Upstream endpoint paths, relative to the API base URL.

pub const LOGIN: &str = "Login/Autenticar";
pub const LINE_SEARCH: &str = "Linha/Buscar";
pub const STOP_SEARCH: &str = "Parada/Buscar";
pub const STOPS_BY_LINE: &str = "Parada/BuscarParadasPorLinha";
pub const STOPS_BY_BUSWAY: &str = "Parada/BuscarParadasPorCorredor";
pub const BUSWAYS: &str = "Corredor";
pub const COMPANIES: &str = "Empresa";
pub const POSITIONS: &str = "Posicao";
pub const FORECAST: &str = "Previsao";
pub const FORECAST_BY_LINE: &str = "Previsao/Linha";
pub const FORECAST_BY_STOP: &str = "Previsao/Parada";
