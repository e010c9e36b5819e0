mod article;
mod category;

pub use self::{
    article::{parse_date, Article},
    category::Category,
};
