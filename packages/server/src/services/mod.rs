pub mod about;
pub mod activity;
pub mod content;
pub mod event;
pub mod founder;
pub mod gallery;
pub mod hero;
pub mod mentor_talk;
pub mod program;
pub mod stats;
pub mod team;
pub mod testimonial;

pub use about::AboutService;
pub use event::EventService;
pub use founder::FounderService;
pub use gallery::GalleryService;
pub use hero::HeroService;
pub use mentor_talk::MentorTalkService;
pub use program::ProgramService;
pub use team::TeamService;
pub use testimonial::TestimonialService;
