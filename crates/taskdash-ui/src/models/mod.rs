pub mod dashboard_model;
pub mod login_model;
pub mod map_model;
pub mod todo_detail_model;
pub mod todo_form_model;
pub mod todo_list_model;
pub mod weather_model;

pub use dashboard_model::DashboardModel;
pub use login_model::LoginModel;
pub use map_model::{MapModel, MapSettings};
pub use todo_detail_model::TodoDetailModel;
pub use todo_form_model::{FormMode, TodoFormModel};
pub use todo_list_model::TodoListModel;
pub use weather_model::{WeatherModel, WeatherStatus};
