use crate::config::DeskConfig;
use crate::fixtures::FixtureStore;
use crate::session::Session;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: DeskConfig,
    pub fixtures: FixtureStore,
    pub session: Session,
}
