//! 启动流程与帧循环
//!
//! 设置对话框 → 显示模式 → 渲染窗口 → 设备与交换链 → 全屏四边形渲染。
//! 局部变量按创建的相反顺序释放。

use std::path::Path;
use std::time::Instant;

use qv_core::frame::fps_title;
use qv_core::{FpsCounter, FrameDecision, LaunchConfig};
use qv_platform_windows::win_api;
use qv_platform_windows::{
    DeviceDesc, DxgiDisplays, GraphicsDevice, PumpResult, QuadRenderer, RenderWindow,
    SetupDialog, ShaderBytecode,
};
use qv_settings::ConfigManager;

use crate::constants::{APP_TITLE, FPS_SAMPLE_FRAMES, WINDOW_CLASS_NAME};
use crate::error::{AppError, AppResult};

/// Run until the window closes. Cancelling the setup dialog is a clean exit.
pub fn run() -> AppResult<()> {
    if let Err(e) = win_api::set_process_per_monitor_dpi_aware() {
        log::debug!("DPI awareness already set: {e}");
    }

    let config = ConfigManager::new();
    let displays = DxgiDisplays::new()?;

    let Some(launch) = choose_launch_config(&config, &displays)? else {
        return Ok(());
    };

    let mode = launch.resolve_display_mode(&displays, config.windowed_size())?;
    log::info!(
        "Adapter {} output {}: {} ({})",
        launch.adapter,
        launch.output,
        mode.describe(),
        if launch.windowed { "windowed" } else { "full screen" }
    );

    let window = RenderWindow::create(
        WINDOW_CLASS_NAME,
        APP_TITLE,
        mode.width,
        mode.height,
        launch.windowed,
    )
    .map_err(|e| AppError::Window(e.message()))?;

    let device = GraphicsDevice::create(
        &displays,
        window.hwnd(),
        DeviceDesc {
            adapter: launch.adapter,
            display_mode: mode,
            multi_sample: launch.multi_sample,
            windowed: launch.windowed,
            debug: config.debug_device(),
        },
    )?;
    window.set_swap_chain_ready(true);

    let display_aspect = launch.aspect.resolve(&mode);
    let shader_dir = config.shader_dir();
    let shaders = ShaderBytecode::load(shader_dir.as_deref().map(Path::new))?;
    let renderer = QuadRenderer::create(
        &device,
        &shaders,
        config.content_aspect_ratio(),
        display_aspect,
    )?;

    frame_loop(&window, &device, &renderer, &launch);

    log::info!("Shutting down");
    Ok(())
}

/// Setup dialog result, or the saved settings when the dialog is disabled.
/// `None` when the user cancelled.
fn choose_launch_config(
    config: &ConfigManager,
    displays: &DxgiDisplays,
) -> AppResult<Option<LaunchConfig>> {
    let defaults = config.launch_config();
    if !config.show_setup_dialog() {
        return Ok(Some(defaults));
    }

    let Some(chosen) = SetupDialog::show(displays, APP_TITLE, &defaults)? else {
        return Ok(None);
    };

    if let Err(e) = config.update(|settings| settings.remember(&chosen)) {
        log::warn!("Failed to save settings: {e}");
    }
    Ok(Some(chosen))
}

fn frame_loop(
    window: &RenderWindow,
    device: &GraphicsDevice,
    renderer: &QuadRenderer,
    launch: &LaunchConfig,
) {
    let sync_interval = launch.sync_interval();
    let mut fps = FpsCounter::new(FPS_SAMPLE_FRAMES);
    let mut last_frame = Instant::now();

    loop {
        match window.pump() {
            PumpResult::Quit => break,
            PumpResult::Dispatched | PumpResult::Idle(FrameDecision::Yield) => {}
            PumpResult::Idle(FrameDecision::Render) => {
                renderer.render_frame(device.context());
                device.present(sync_interval);

                if window.is_windowed() {
                    let now = Instant::now();
                    if let Some(rate) = fps.tick(now - last_frame) {
                        window.set_title(&fps_title(window.title(), rate));
                    }
                    last_frame = now;
                }
            }
        }
    }
}
