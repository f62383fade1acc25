mod export_params;
mod export_params_builder;
mod ini_file;

pub use self::{
    export_params::{ExportParams, DEFAULT_CONFIG_FILE},
    export_params_builder::ExportParamsBuilder,
    ini_file::IniFile,
};
