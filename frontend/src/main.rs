use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::Odometer;
use services::Logger;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| services::config::load_or_default());

    html! {
        <Odometer config={(*config).clone()} />
    }
}

fn main() {
    Logger::init(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
