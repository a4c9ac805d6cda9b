//! UI Components
//!
//! Leptos components for the Healthtant pages.

mod account;
mod analysis;
mod delete_confirm_button;
mod diet_list;
mod diet_upload;
mod favorite_button;
mod favorite_list;
mod food_card;
mod product_favorite;
mod refine_panel;
mod search_bar;
mod search_page;
mod toast;

pub use account::{PasswordForm, WithdrawForm};
pub use analysis::{AnalysisDateForm, CalorieChart, CategoryChart};
pub use delete_confirm_button::DeleteConfirmButton;
pub use diet_list::DietList;
pub use diet_upload::DietUploadPage;
pub use favorite_button::FavoriteButton;
pub use favorite_list::FavoriteList;
pub use food_card::{CardAction, FoodCard};
pub use product_favorite::ProductFavorite;
pub use refine_panel::RefinePanel;
pub use search_bar::SearchBar;
pub use search_page::SearchPage;
pub use toast::ToastStack;
