use crate::client::Controller;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub controller: Controller,
    pub config: Config,
}
