pub mod auth_service;
pub mod map_service;
pub mod todo_service;
pub mod weather_service;

pub use auth_service::{request_login, AuthServiceMessage};
pub use map_service::{
    request_reverse as request_map_reverse, request_route as request_map_route,
    request_search as request_map_search, MapServiceMessage,
};
pub use todo_service::{
    request_create as request_todo_create, request_delete as request_todo_delete,
    request_fetch as request_todo_fetch, request_get as request_todo_get,
    request_update as request_todo_update, TodoServiceMessage,
};
pub use weather_service::{request_fetch as request_weather_fetch, WeatherServiceMessage};
