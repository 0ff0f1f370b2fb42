//! # 页面上传工具 — 应用入口
//!
//! 本文件仅负责命令行参数解析、日志初始化与激活开关判断。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;

use page_uploader::error::AppError;
use page_uploader::settings::{self, AppSettings};
use page_uploader::uploader::{PageSource, UploadHandler, destination};

const DEFAULT_SETTINGS_FILE: &str = "settings.json";

const HELP: &str = "\
page-uploader — 将已渲染的页面图片编码为 JPEG 并上传到本地归档服务

用法：
  page-uploader [--settings <路径>] [--source <文件|data URL>] [--album <合集名>] [--page <页号>]
  page-uploader --init [--settings <路径>]

说明：
  设置文件中 enabled=false（默认值）时不执行任何网络操作。
  命令行参数优先于设置文件中的同名字段。
  --init 在指定路径生成一份带默认配置的设置模板。
";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("❌ 运行失败：{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let settings_path: PathBuf = opt_arg(&mut args, "--settings")?
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    if args.contains("--init") {
        settings::save_app_settings(&settings_path, &AppSettings::default())?;
        log::info!("📝 已生成设置模板：{}", settings_path.display());
        return Ok(());
    }

    let mut app_settings = settings::load_app_settings(&settings_path)?;

    if let Some(source) = opt_arg(&mut args, "--source")? {
        app_settings.source = source;
    }
    if let Some(album) = opt_arg(&mut args, "--album")? {
        app_settings.album = album;
    }
    if let Some(page) = opt_arg(&mut args, "--page")? {
        app_settings.page = page;
    }

    let leftovers = args.finish();
    if !leftovers.is_empty() {
        return Err(AppError::Cli(format!("无法识别的参数: {:?}", leftovers)));
    }

    if !app_settings.enabled {
        log::info!("⏸️ 上传未启用（enabled=false），本次不执行任何网络操作");
        return Ok(());
    }

    if app_settings.source.is_empty() {
        return Err(AppError::Cli(
            "缺少图片来源（--source 或设置文件 source 字段）".to_string(),
        ));
    }

    let handler = UploadHandler::new(app_settings.config.clone())?;
    let target = destination::page_url(&app_settings.endpoint, &app_settings.album, &app_settings.page)?;

    // 归档服务对“页面尚不存在”返回 200（已存在时返回 404），
    // 因此探测结果为 true 表示可以上传。
    if !handler.page_exists(target.as_str()).await? {
        log::info!("⏭️ 服务器已存在该页，跳过上传：{}", target);
        return Ok(());
    }

    let source = PageSource::from_cli_value(&app_settings.source);
    let status = handler.upload_page(&source, target.as_str()).await?;
    log::info!("📤 本次上传结束 - HTTP {}", status);

    Ok(())
}

fn opt_arg(args: &mut pico_args::Arguments, name: &'static str) -> Result<Option<String>, AppError> {
    args.opt_value_from_str(name)
        .map_err(|e| AppError::Cli(format!("解析 {} 失败: {}", name, e)))
}
