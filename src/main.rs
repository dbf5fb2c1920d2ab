use summer_toolbox_ui::app::App;

fn main() {
    console_error_panic_hook::set_once();
    summer_toolbox_ui::logging::init();
    log::info!("summer toolbox ui starting");
    leptos::mount::mount_to_body(App);
}
