//! Localization catalog for the two supported locales.
//!
//! Every user-facing label, prompt and error message is referenced by key.
//! Switching the language at runtime re-renders all visible labels because
//! the presentation layer resolves keys on every frame.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "ru")]
    Ru,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ru];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// Native-language display name used by the language picker
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }
}

/// Resolve a message key for the given language. Unknown keys come back
/// verbatim so a missing translation is visible rather than a panic.
pub fn text(language: Language, key: &str) -> &'static str {
    let resolved = match language {
        Language::En => text_en(key),
        Language::Ru => text_ru(key),
    };
    match resolved {
        Some(s) => s,
        None => {
            tracing::warn!("Missing translation for key '{}'", key);
            leak_key(key)
        }
    }
}

fn leak_key(key: &str) -> &'static str {
    Box::leak(key.to_string().into_boxed_str())
}

fn text_en(key: &str) -> Option<&'static str> {
    Some(match key {
        "menu_title" => "Menu",
        "connections_title" => "Connections",
        "help_title" => "Help",
        "menu_add" => "Add connection",
        "menu_language" => "Language",
        "menu_edit_config" => "Edit config",
        "menu_exit" => "Exit",

        "btn_ok" => "OK",
        "btn_cancel" => "Cancel",
        "btn_save" => "Save",

        "form_server" => "SSH server",
        "form_port" => "Port",
        "form_comment" => "Comment",
        "form_username" => "Username",
        "title_add" => "Add connection",
        "title_edit" => "Edit connection",
        "title_language" => "Language",
        "title_error" => "Error",

        "msg_no_connections" => "No saved connections",
        "msg_enter_server" => "Enter server address",
        "msg_enter_comment" => "Enter comment",
        "msg_port_numeric" => "Port must be a number",
        "msg_conn_exists" => "Connection already exists",
        "msg_connecting" => "Connecting to {}",
        "msg_conn_error" => "Connection error to {}",
        "msg_dismiss_hint" => "Press Enter or Esc to dismiss",

        "dlg_connect" => "Connect to {}?",
        "dlg_edit" => "Edit connection {}?",
        "dlg_delete" => "Delete connection {}?",
        "dlg_add" => "Add new connection?",

        "help_text" => {
            " Controls:\n ↑↓ - Navigate list           Tab - Switch section\n Enter - Connect              Ctrl+E - Edit connection\n Ctrl+N - Add connection      Del - Delete connection\n Ctrl+R - Refresh window      Ctrl+C - Exit"
        }

        "msg_config_open_error" => "Error opening config",
        "msg_app_error" => "Application error",

        _ => return None,
    })
}

fn text_ru(key: &str) -> Option<&'static str> {
    Some(match key {
        "menu_title" => "Меню",
        "connections_title" => "Соединения",
        "help_title" => "Помощь",
        "menu_add" => "Добавить соединение",
        "menu_language" => "Язык",
        "menu_edit_config" => "Редактировать конфиг",
        "menu_exit" => "Выход",

        "btn_ok" => "OK",
        "btn_cancel" => "Отмена",
        "btn_save" => "Сохранить",

        "form_server" => "SSH сервер",
        "form_port" => "Порт",
        "form_comment" => "Комментарий",
        "form_username" => "Имя пользователя",
        "title_add" => "Добавить соединение",
        "title_edit" => "Редактировать соединение",
        "title_language" => "Язык",
        "title_error" => "Ошибка",

        "msg_no_connections" => "Нет сохраненных соединений",
        "msg_enter_server" => "Введите адрес сервера",
        "msg_enter_comment" => "Введите комментарий",
        "msg_port_numeric" => "Порт должен быть числом",
        "msg_conn_exists" => "Такое соединение уже существует",
        "msg_connecting" => "Подключение к {}",
        "msg_conn_error" => "Ошибка подключения к {}",
        "msg_dismiss_hint" => "Enter или Esc - закрыть",

        "dlg_connect" => "Подключиться к {}?",
        "dlg_edit" => "Редактировать соединение {}?",
        "dlg_delete" => "Удалить соединение {}?",
        "dlg_add" => "Добавить новое соединение?",

        "help_text" => {
            " Управление:\n ↑↓ - Навигация по списку     Tab - Переключить секцию\n Enter - Подключиться         Ctrl+E - Редактировать\n Ctrl+N - Добавить            Del - Удалить\n Ctrl+R - Обновить окно       Ctrl+C - Выход"
        }

        "msg_config_open_error" => "Ошибка открытия конфига",
        "msg_app_error" => "Ошибка приложения",

        _ => return None,
    })
}

/// Resolve a `{}` template key and substitute a single argument
pub fn template(language: Language, key: &str, arg: &str) -> String {
    text(language, key).replacen("{}", arg, 1)
}
