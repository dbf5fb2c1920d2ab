mod copy_button;
mod encoder_decoder;
mod history_page;
mod home;
mod image_converter;
mod json_formatter;
mod simple_page;

pub use copy_button::CopyButton;
pub use encoder_decoder::EncoderDecoder;
pub use history_page::HistoryPage;
pub use home::HomePage;
pub use image_converter::ImageConverter;
pub use json_formatter::JsonFormatter;
pub use simple_page::SimplePage;

pub const FONT: &str = "'JetBrains Mono', 'Fira Code', Consolas, monospace";

pub const PAGE_TITLE: &str = "margin: 0 0 16px 0; font-size: 20px; color: #aaffbb; \
                              text-shadow: 0 0 6px #44dd66; letter-spacing: 0.5px;";

pub const PANEL: &str = "border: 1px solid #44dd66; background: #040804; padding: 16px; \
                         margin-bottom: 16px; box-shadow: 0 0 12px rgba(68, 221, 102, 0.15);";

pub const INPUT: &str = "width: 100%; background: #020202; color: #ccffdd; border: 1px solid #33aa55; \
                         padding: 8px; box-sizing: border-box; outline: none; \
                         font-family: inherit; font-size: 13px;";

pub const TEXTAREA: &str = "width: 100%; min-height: 120px; background: #020202; color: #ccffdd; \
                            border: 1px solid #33aa55; padding: 8px; box-sizing: border-box; \
                            outline: none; resize: vertical; font-family: inherit; font-size: 13px;";

pub const BUTTON: &str = "background: transparent; color: #66cc88; border: 1px solid #66cc88; \
                          padding: 8px 16px; cursor: pointer; font-family: inherit; font-size: 12px;";

pub const BUTTON_PRIMARY: &str = "background: #44dd66; color: #020202; border: none; \
                                  padding: 8px 16px; cursor: pointer; \
                                  font-family: inherit; font-size: 12px; font-weight: bold;";

pub const BUTTON_DANGER: &str = "background: transparent; color: #ff6655; border: 1px solid #ff6655; \
                                 padding: 8px 16px; cursor: pointer; font-family: inherit; font-size: 12px;";

pub const ERROR_TEXT: &str = "color: #ff6655; font-size: 12px; margin: 8px 0;";

pub const LABEL: &str = "display: block; color: #66cc88; font-size: 11px; \
                         letter-spacing: 0.5px; margin-bottom: 6px;";

pub const DIVIDER: &str = "border: none; border-top: 1px dashed #33aa55; margin: 16px 0;";

pub const MODAL_BACKDROP: &str = "position: fixed; inset: 0; background: rgba(0,0,0,0.9); \
                                  display: flex; align-items: center; justify-content: center; \
                                  z-index: 1000;";

pub const MODAL_BODY: &str = "width: 90vw; max-width: 720px; max-height: 80vh; overflow-y: auto; \
                              background: #020202; border: 1px solid #44dd66; \
                              box-shadow: 0 0 30px rgba(68, 221, 102, 0.3); padding: 24px; \
                              color: #ccffdd; font-size: 13px;";
