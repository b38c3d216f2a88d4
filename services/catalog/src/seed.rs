//! Initial genre set

use tracing::info;

use crate::{error::CatalogResult, models::NewGenre, repositories::GenreRepository};

const SEED_GENRES: [(&str, &str, &str); 8] = [
    (
        "Fiction",
        "https://images.unsplash.com/photo-1544947950-fa07a98d237f?auto=format&fit=crop&w=400&q=80",
        "Immerse yourself in captivating fictional worlds",
    ),
    (
        "Non-Fiction",
        "https://images.unsplash.com/photo-1512820790803-83ca734da794?auto=format&fit=crop&w=400&q=80",
        "Discover real stories and factual insights",
    ),
    (
        "Science Fiction",
        "https://images.unsplash.com/photo-1518770660439-4636190af475?auto=format&fit=crop&w=400&q=80",
        "Explore futuristic and imaginative narratives",
    ),
    (
        "Mystery",
        "https://images.unsplash.com/photo-1515879218367-8466d910aaa4?auto=format&fit=crop&w=400&q=80",
        "Unravel thrilling mysteries and suspense",
    ),
    (
        "Romance",
        "https://images.unsplash.com/photo-1474552226712-ac0f0961a954?auto=format&fit=crop&w=400&q=80",
        "Experience heartwarming love stories",
    ),
    (
        "Biography",
        "https://images.unsplash.com/photo-1457369804613-52c61a468e7d?auto=format&fit=crop&w=400&q=80",
        "Read about remarkable lives and achievements",
    ),
    (
        "Self-Help",
        "https://images.unsplash.com/photo-1532012197267-da84d127e765?auto=format&fit=crop&w=400&q=80",
        "Transform your life with practical guidance",
    ),
    (
        "History",
        "https://images.unsplash.com/photo-1461360370896-922624d12aa1?auto=format&fit=crop&w=400&q=80",
        "Journey through time and historical events",
    ),
];

pub fn default_genres() -> Vec<NewGenre> {
    SEED_GENRES
        .iter()
        .map(|(name, image_url, description)| NewGenre {
            name: name.to_string(),
            image_url: Some(image_url.to_string()),
            description: Some(description.to_string()),
        })
        .collect()
}

/// Insert the default genres when none exist; returns how many were added
pub async fn seed_genres(genres: &dyn GenreRepository) -> CatalogResult<usize> {
    if genres.count().await? > 0 {
        return Ok(0);
    }

    let defaults = default_genres();
    for genre in &defaults {
        genres.create(genre).await?;
    }

    info!(count = defaults.len(), "Genres seeded");
    Ok(defaults.len())
}
