//! Images Section
//!
//! Gallery of uploaded images with a full-size viewer.

use leptos::prelude::*;

use super::modal::Modal;
use crate::models::ImageAsset;
use crate::store::{use_freya_store, FreyaStateStoreFields};
use crate::views::{format_date, or_default};

fn display_name(image: &ImageAsset) -> String {
    or_default(&image.original_name, &image.filename).to_string()
}

#[component]
pub fn ImagesView() -> impl IntoView {
    let store = use_freya_store();
    let viewing = RwSignal::new(None::<ImageAsset>);
    let on_close = Callback::new(move |_: ()| viewing.set(None));

    view! {
        <div class="section-header">
            <h2>"Images"</h2>
        </div>
        {move || {
            let images = store.images().get();
            if images.is_empty() {
                return view! { <p class="empty-state">"No images uploaded yet."</p> }.into_any();
            }
            view! {
                <div class="image-grid">
                    {images
                        .into_iter()
                        .map(|image| {
                            let name = display_name(&image);
                            let created = format_date(&image.created);
                            let url = image.url.clone();
                            view! {
                                <figure class="image-card" on:click=move |_| viewing.set(Some(image.clone()))>
                                    <img src=url alt=name.clone() loading="lazy" />
                                    <figcaption>
                                        <span class="image-name">{name}</span>
                                        <span class="date">{created}</span>
                                    </figcaption>
                                </figure>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        }}
        {move || {
            viewing
                .get()
                .map(|image| {
                    let name = display_name(&image);
                    let title = name.clone();
                    view! {
                        <Modal title=title on_close=on_close wide=true>
                            <img class="image-full" src=image.url.clone() alt=name />
                            <p class="image-description">{image.description.clone()}</p>
                            <div class="tag-list">
                                {image.tags.iter().map(|tag| view! { <span class="tag">{tag.clone()}</span> }).collect_view()}
                            </div>
                        </Modal>
                    }
                })
        }}
    }
}
