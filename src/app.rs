//! Healthtant Frontend App
//!
//! Picks the page binding named by the page config.

use leptos::prelude::*;

use healthtant_feed::{PageConfig, PageKind};

use crate::components::{
    AnalysisDateForm, CalorieChart, CardAction, CategoryChart, DietList, DietUploadPage,
    FavoriteList, PasswordForm, ProductFavorite, SearchPage, ToastStack, WithdrawForm,
};
use crate::context::AppContext;

#[component]
pub fn App(config: PageConfig) -> impl IntoView {
    let page = config.page;
    provide_context(AppContext::new(config));

    let body = match page {
        PageKind::Search => view! { <SearchPage action=CardAction::Favorite /> }.into_any(),
        PageKind::AdvancedSearch => {
            view! { <SearchPage action=CardAction::Favorite refine=true /> }.into_any()
        }
        PageKind::DietSearch => view! { <SearchPage action=CardAction::Register /> }.into_any(),
        PageKind::Product => view! { <ProductFavorite /> }.into_any(),
        PageKind::Diets => view! { <DietList /> }.into_any(),
        PageKind::DietUpload => view! { <DietUploadPage /> }.into_any(),
        PageKind::Favorites => view! { <FavoriteList /> }.into_any(),
        PageKind::AnalysisDate => view! { <AnalysisDateForm /> }.into_any(),
        PageKind::AnalysisCategories => view! { <CategoryChart /> }.into_any(),
        PageKind::AnalysisDiet => view! { <CalorieChart /> }.into_any(),
        PageKind::PasswordChange => view! { <PasswordForm /> }.into_any(),
        PageKind::Withdraw => view! { <WithdrawForm /> }.into_any(),
    };

    view! {
        {body}
        <ToastStack />
    }
}
