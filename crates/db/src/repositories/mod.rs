//! One repository per table. All SQL lives here; handlers never touch
//! the pool directly with raw queries.

mod country_repo;
mod genre_repo;
mod movie_repo;
mod person_repo;
mod profession_repo;
mod rating_repo;
mod review_repo;
mod session_repo;
mod user_repo;

pub use country_repo::CountryRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use person_repo::PersonRepo;
pub use profession_repo::ProfessionRepo;
pub use rating_repo::RatingRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
