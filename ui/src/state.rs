use std::sync::Arc;

use dashboard_business::{
    BusinessConfig, CrudApi, HttpResource, MessageCatalog, ResourceSchema, TableOptions,
    TableScreen,
};

use crate::widgets::{NoticeBoard, TableView};

/// Resource shipped with the demo.
pub const NODE_RESOURCE: &str = include_str!("../assets/node.json");
/// Translations shipped with the demo.
pub const TRANSLATIONS: &str = include_str!("../assets/en.json");

/// The main application state.
pub struct State {
    pub config: BusinessConfig,
    pub catalog: MessageCatalog,
    pub screen: TableScreen,
    pub notices: NoticeBoard,
    pub table: TableView,
}

impl State {
    /// State for the bundled `node` resource served from `config`.
    pub fn new(config: BusinessConfig) -> anyhow::Result<Self> {
        let schema = ResourceSchema::from_json_str(NODE_RESOURCE)?;
        let catalog = MessageCatalog::from_json_str(TRANSLATIONS)?;
        let resource = Arc::new(HttpResource::new(&config, "node"));

        let options = TableOptions {
            selection: true,
            ..TableOptions::new("node", &config.lang_for("node"))
        };
        let screen = TableScreen::new(CrudApi::full(resource), schema, options, &catalog);

        Ok(Self {
            config,
            catalog,
            screen,
            notices: NoticeBoard::default(),
            table: TableView::default(),
        })
    }

    /// State talking to a test server at `base_url`.
    pub fn test(base_url: String) -> Self {
        match Self::new(BusinessConfig::new(base_url)) {
            Ok(state) => state,
            Err(err) => panic!("bundled resources must parse: {err}"),
        }
    }
}
