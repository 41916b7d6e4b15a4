use std::time::Duration;

use serde::Deserialize;

use crate::api::FoodPost;
use crate::client::filter::SearchFilter;
use crate::client::preview::Thumbnail;
use crate::client::toasts::Toasts;

/// Top-level sections; exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Browse,
    Share,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Browse, View::Share];

    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Browse => "browse",
            View::Share => "share",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Login,
    Register,
    FoodDetail,
}

impl Modal {
    pub fn name(&self) -> &'static str {
        match self {
            Modal::Login => "login",
            Modal::Register => "register",
            Modal::FoodDetail => "food-detail",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Modal::Login, Modal::Register, Modal::FoodDetail]
            .into_iter()
            .find(|m| m.name() == name)
    }
}

/// Independent show/hide flags layered over the active view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modals {
    pub login: bool,
    pub register: bool,
    pub food_detail: bool,
}

impl Modals {
    fn flag(&mut self, modal: Modal) -> &mut bool {
        match modal {
            Modal::Login => &mut self.login,
            Modal::Register => &mut self.register,
            Modal::FoodDetail => &mut self.food_detail,
        }
    }

    pub fn open(&mut self, modal: Modal) {
        *self.flag(modal) = true;
    }

    pub fn close(&mut self, modal: Modal) {
        *self.flag(modal) = false;
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::Login => self.login,
            Modal::Register => self.register,
            Modal::FoodDetail => self.food_detail,
        }
    }

    /// Switch from the register dialog to the login dialog.
    pub fn show_login(&mut self) {
        self.register = false;
        self.login = true;
    }

    /// Switch from the login dialog to the register dialog.
    pub fn show_register(&mut self) {
        self.login = false;
        self.register = true;
    }
}

/// The posts currently rendered in the grid.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub posts: Vec<FoodPost>,
    in_flight: u32,
}

impl Listing {
    pub fn start_loading(&mut self) {
        self.in_flight += 1;
    }

    pub fn finish_loading(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub city: String,
    pub bio: String,
}

/// Text fields of the share form. Files travel separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShareDraft {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub quantity: String,
    pub expiry_date: String,
    pub pickup_location: String,
    pub pickup_time_start: String,
    pub pickup_time_end: String,
}

/// Values the forms show after a re-render. Successful submissions reset
/// them; failed ones keep what was typed. Passwords are never kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forms {
    pub login: LoginForm,
    pub register: RegisterForm,
    pub share: ShareDraft,
}

impl Forms {
    pub fn keep_login(&mut self, form: &LoginForm) {
        self.login = LoginForm {
            username: form.username.clone(),
            password: String::new(),
        };
    }

    pub fn keep_register(&mut self, form: &RegisterForm) {
        self.register = RegisterForm {
            password: String::new(),
            ..form.clone()
        };
    }
}

#[derive(Debug)]
pub struct UiState {
    pub view: View,
    pub modals: Modals,
    pub listing: Listing,
    pub detail: Option<FoodPost>,
    pub preview: Vec<Thumbnail>,
    pub filter: SearchFilter,
    pub forms: Forms,
    pub toasts: Toasts,
}

impl UiState {
    pub fn new(toast_ttl: Duration) -> Self {
        Self {
            view: View::default(),
            modals: Modals::default(),
            listing: Listing::default(),
            detail: None,
            preview: Vec::new(),
            filter: SearchFilter::default(),
            forms: Forms::default(),
            toasts: Toasts::new(toast_ttl),
        }
    }
}
