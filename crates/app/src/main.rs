use gpui::*;
use gpui_component::{Root, ThemeRegistry};

use murmur::app::{ChatAppShell, Quit, ToggleSidebar, default_themes_path};
use murmur::settings::SettingsStore;

/// Application entry point.
///
/// Bootstraps the GPUI application with:
/// 1. Asset loading via gpui-component-assets
/// 2. gpui-component initialization (required for Root and themes)
/// 3. Theme loading/watching from ./themes directory (non-fatal if missing)
/// 4. Global action handlers for shell-level commands
/// 5. Window creation with Root wrapper for gpui-component composition
fn main() {
    tracing_subscriber::fmt::init();

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(|cx| {
        // Initialize gpui-component - REQUIRED before any Root usage
        gpui_component::init(cx);

        // Attempt to load and watch themes from ./themes directory.
        // Non-fatal: a missing or empty directory falls back to the
        // built-in themes.
        if let Err(err) = ThemeRegistry::watch_dir(default_themes_path(), cx, |_cx| {
            let settings_store = SettingsStore::load();
            settings_store.settings().apply_theme(None, _cx);
            tracing::info!("Theme directory watch initialized");
        }) {
            tracing::warn!(
                "Failed to watch themes directory: {}. Using default themes.",
                err
            );
            let settings_store = SettingsStore::load();
            settings_store.settings().apply_theme(None, cx);
        }

        // Quit action: cleanly shut down the application
        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        // Global keyboard shortcuts
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-b", ToggleSidebar, None),
        ]);

        // Spawn async window creation to ensure all initialization is complete
        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(1100.), px(760.)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(9.), px(9.))),
                        ..Default::default()
                    }),
                    // Client decorations on Linux/FreeBSD so the app draws its
                    // own title area instead of a system titlebar.
                    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
                    window_decorations: Some(WindowDecorations::Client),
                    #[cfg(not(any(target_os = "linux", target_os = "freebsd")))]
                    window_decorations: None,
                    ..Default::default()
                };

                cx.open_window(options, |window, cx| {
                    let shell = cx.new(|cx| ChatAppShell::new(window, cx));

                    // Root is REQUIRED by gpui-component composition
                    cx.new(|cx| Root::new(shell, window, cx))
                })
                .expect("failed to open main window");

                cx.activate(true);
            })
        })
        .detach();
    });
}
