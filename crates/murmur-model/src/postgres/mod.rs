mod comments;
mod followers;
mod groups;
mod posts;
mod users;
