use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup, ParseMode, User,
    WebAppInfo,
};
use teloxide::utils::html;
use url::Url;

use crate::config::Settings;

pub const FALLBACK_NAME: &str = "Foydalanuvchi";
pub const WEBAPP_BUTTON_TEXT: &str = "🧮 Kalkulyatorni ochish";
pub const CREATED_YEAR: u16 = 2025;

/// 一条待发送的回复：文本、解析模式和可选的内联键盘
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub markup: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            markup: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: Some(ParseMode::Html),
            markup: None,
        }
    }

    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.markup = Some(markup);
        self
    }

    /// 回复中第一个 Web App 按钮指向的地址
    pub fn webapp_url(&self) -> Option<&Url> {
        self.markup
            .as_ref()?
            .inline_keyboard
            .iter()
            .flatten()
            .find_map(|button| match &button.kind {
                InlineKeyboardButtonKind::WebApp(info) => Some(&info.url),
                _ => None,
            })
    }
}

/// 发送者的显示名，没有发送者或名字为空时使用默认称呼
pub fn display_name(user: Option<&User>) -> &str {
    user.map(|u| u.first_name.as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(FALLBACK_NAME)
}

pub fn greeting(name: &str, webapp_url: &Url) -> Reply {
    let text = format!(
        "Assalomu alaykum, {name}! 👋\n\n\
         Savdo Kalkulyatori Mini App-ga xush kelibsiz!\n\n\
         Bu bot orqali siz:\n\
         • Mahsulot narxini hisoblashingiz\n\
         • Valyuta kursini ko'rishingiz mumkin\n\n\
         Boshlash uchun quyidagi tugmani bosing:"
    );

    Reply::plain(text).with_markup(webapp_keyboard(webapp_url))
}

pub fn webapp_keyboard(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::web_app(
        WEBAPP_BUTTON_TEXT,
        WebAppInfo {
            url: webapp_url.clone(),
        },
    )]])
}

pub fn help(settings: &Settings) -> Reply {
    let text = format!(
        "🔹 <b>Yordam</b>\n\n\
         <b>Asosiy buyruqlar:</b>\n\
         /start - Botni ishga tushirish va kalkulyatorni ochish\n\
         /help - Yordam olish\n\
         /about - Bot haqida ma'lumot\n\n\
         <b>Kalkulyator xususiyatlari:</b>\n\
         • Asl narxni belgilash (KRW)\n\
         • Og'irlik bo'yicha pochta xarajatini hisoblash\n\
         • Foyda foizini sozlash\n\
         • Real vaqtda valyuta kursini olish\n\n\
         <b>Muammo bo'lsa:</b> {contact}",
        contact = html::escape(&settings.support_contact),
    );

    Reply::html(text)
}

pub fn about(settings: &Settings) -> Reply {
    let text = format!(
        "📊 <b>Savdo Kalkulyatori</b>\n\n\
         Versiya: {version}\n\
         Yaratilgan: {CREATED_YEAR}\n\n\
         Bu bot savdogarlar uchun narxlarni hisoblashda yordam beradi.\n\n\
         • Real valyuta kurslari\n\
         • Avtomatik narx hisoblash\n\n\
         Web versiya: {url}",
        version = env!("CARGO_PKG_VERSION"),
        url = html::escape(settings.webapp_url.as_str()),
    );

    Reply::html(text)
}

/// Mini App 通过 sendData 回传数据后的确认
pub fn webapp_data_received(data: &str) -> Reply {
    Reply::plain(format!("Ma'lumotlar qabul qilindi: {data}"))
}
