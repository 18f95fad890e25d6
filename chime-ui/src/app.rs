//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{ThemeToggle, Toast};
use crate::pages::{Dashboard, Login, ResetPassword, Signup};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gradient-to-br from-fuchsia-100 via-blue-100 to-cyan-100 dark:from-gray-900 dark:via-gray-900 dark:to-gray-800 transition-colors">
                <ThemeToggle />

                <main>
                    <Routes>
                        <Route path="/" view=|| view! { <Redirect path="/dashboard" /> } />
                        <Route path="/login" view=Login />
                        <Route path="/signup" view=Signup />
                        <Route path="/reset-password" view=ResetPassword />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2 text-fuchsia-700">"Page Not Found"</h1>
            <p class="text-gray-600 dark:text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/dashboard"
                class="px-6 py-3 bg-fuchsia-600 hover:bg-fuchsia-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
