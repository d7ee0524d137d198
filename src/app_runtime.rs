use std::cell::RefCell;

use crate::app_router::{self, InitConfig};

thread_local! {
    static INIT_CONFIG: RefCell<Option<InitConfig>> = RefCell::new(None);
}

pub(crate) fn set_init_config(config: InitConfig) {
    INIT_CONFIG.with(|slot| {
        *slot.borrow_mut() = Some(config);
    });
}

/// Config for this page session, read from the URL on first use.
pub(crate) fn init_config() -> InitConfig {
    if let Some(config) = INIT_CONFIG.with(|slot| slot.borrow().clone()) {
        return config;
    }
    let config = app_router::load_init_config();
    set_init_config(config.clone());
    config
}
