use calendar_domain::EventStats;
use shared::User;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user: User,
    pub stats: EventStats,
    pub on_open_profile: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let first_name = props.user.name.split_whitespace().next().unwrap_or(&props.user.name);

    let on_profile_click = {
        let on_open_profile = props.on_open_profile.clone();
        Callback::from(move |_: MouseEvent| on_open_profile.emit(()))
    };

    let on_logout_click = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{format!("{}'s Calendar", first_name)}</h1>
                <div class="header-right">
                    <div class="stats-display">
                        <span class="stat">
                            <span class="stat-value">{props.stats.today}</span>
                            <span class="stat-label">{"today"}</span>
                        </span>
                        <span class="stat">
                            <span class="stat-value">{props.stats.this_week}</span>
                            <span class="stat-label">{"this week"}</span>
                        </span>
                        <span class="stat">
                            <span class="stat-value">{props.stats.total}</span>
                            <span class="stat-label">{"shown"}</span>
                        </span>
                    </div>
                    <div class="header-menus">
                        <button type="button" class="btn btn-secondary" onclick={on_profile_click}>
                            {"👤 Profile"}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_logout_click}>
                            {"Log out"}
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}
