mod account;

pub use account::AccountRepository;
