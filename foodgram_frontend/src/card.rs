use foodgram_model::{Recipe, RecipeId, Tag};
use leptos::*;

use crate::util::{cooking_time, image_or_placeholder};

#[component]
pub fn RecipeCard(
    recipe: Recipe,
    authenticated: bool,
    #[prop(into)] handle_like: Callback<(RecipeId, bool)>,
    #[prop(into)] handle_add_to_cart: Callback<(RecipeId, bool)>,
) -> impl IntoView {
    let Recipe {
        id,
        tags,
        author,
        is_favorited,
        is_in_shopping_cart,
        name,
        image,
        cooking_time: minutes,
        ..
    } = recipe;
    let image = image_or_placeholder(image.as_deref());
    let cart_button = move || {
        let handle_add_to_cart = handle_add_to_cart.clone();
        let (label, class) = if is_in_shopping_cart {
            ("Remove from cart", "button button_style_light-blue-outline")
        } else {
            ("Add to cart", "button button_style_light-blue")
        };
        view! {
            <button class=class on:click=move |_| handle_add_to_cart.call((id, !is_in_shopping_cart))>
                {label}
            </button>
        }
    };
    let like_button = move || {
        let handle_like = handle_like.clone();
        let class = if is_favorited {
            "button button_style_none card__like card__like_active"
        } else {
            "button button_style_none card__like"
        };
        view! {
            <button class=class title="Favorite" on:click=move |_| handle_like.call((id, !is_favorited))>
                "♥"
            </button>
        }
    };

    view! {
        <div class="card" id=format!("recipe-{id}")>
            <a href=format!("/recipes/{id}")>
                <div class="card__image" style=format!("background-image: url({image})")/>
            </a>
            <div class="card__body">
                <a class="card__title" href=format!("/recipes/{id}")>{name}</a>
                <TagBadges tags/>
                <div class="card__time">{cooking_time(minutes)}</div>
                <div class="card__author">{author.display_name()}</div>
            </div>
            <div class="card__footer">
                {authenticated.then(cart_button)}
                {authenticated.then(like_button)}
            </div>
        </div>
    }
}

#[component]
fn TagBadges(tags: Vec<Tag>) -> impl IntoView {
    view! {
        <ul class="tags">
            {tags
                .into_iter()
                .map(|tag| {
                    view! {
                        <li class="tags__item" style=format!("color: {}; border-color: {}", tag.color, tag.color)>
                            {tag.name}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
