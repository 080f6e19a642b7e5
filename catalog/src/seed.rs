//! Demo catalog: ten classics across the five store categories. Used by the CLI and by
//! integration tests.

use storebot_core::CatalogItem;

fn book(
    id: &str,
    title: &str,
    category: &str,
    description: &str,
    price: f64,
    rating: f32,
    stock: u32,
) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        price,
        rating,
        stock,
    }
}

/// Returns the demo items in fixed catalog order.
pub fn demo_catalog() -> Vec<CatalogItem> {
    vec![
        book(
            "b-001",
            "The Great Gatsby",
            "Fiction",
            "A classic American novel about the Jazz Age and the American Dream",
            12.99,
            4.5,
            12,
        ),
        book(
            "b-002",
            "To Kill a Mockingbird",
            "Fiction",
            "A gripping tale of racial injustice and childhood innocence in the American South",
            13.99,
            4.8,
            9,
        ),
        book(
            "b-003",
            "1984",
            "Fiction",
            "George Orwell's dystopian social science fiction novel about totalitarianism",
            11.99,
            4.7,
            15,
        ),
        book(
            "b-004",
            "A Brief History of Time",
            "Science",
            "Stephen Hawking's exploration of the universe and the nature of time",
            16.99,
            4.6,
            7,
        ),
        book(
            "b-005",
            "The Art of War",
            "History",
            "Sun Tzu's ancient Chinese military treatise on strategy and tactics",
            9.99,
            4.4,
            20,
        ),
        book(
            "b-006",
            "Python Programming for Beginners",
            "Education",
            "A comprehensive guide to learning Python programming from scratch",
            24.99,
            4.5,
            11,
        ),
        book(
            "b-007",
            "Steve Jobs",
            "Biography",
            "Walter Isaacson's definitive biography of Apple co-founder Steve Jobs",
            18.99,
            4.7,
            6,
        ),
        book(
            "b-008",
            "The Hitchhiker's Guide to the Galaxy",
            "Fiction",
            "Douglas Adams' comedic science fiction series about space travel",
            14.99,
            4.6,
            8,
        ),
        book(
            "b-009",
            "Sapiens: A Brief History of Humankind",
            "History",
            "Yuval Noah Harari's exploration of human history and evolution",
            19.99,
            4.8,
            10,
        ),
        book(
            "b-010",
            "The Alchemist",
            "Fiction",
            "Paulo Coelho's philosophical novel about following your dreams",
            13.99,
            4.5,
            14,
        ),
    ]
}
