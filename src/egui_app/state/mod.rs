use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::egui_app::api_client::{ApiClient, NewNotification, Notification, PasswordChange};
use crate::egui_app::auth::{self, AuthState};
use crate::egui_app::config::Config;
use crate::egui_app::location::{estimate_route, Geocoder, HttpGeocoder, LocationFeed, Place, Position};
use crate::egui_app::messaging::ChatState;
use crate::egui_app::notify::Notifier;
use crate::egui_app::session::{Destination, SessionStore, StoredPosition};
use crate::egui_app::trip::{PollScheduler, TripMonitor, TripPhase};
use crate::egui_app::types::{AppView, AuthSession, RegisterRequest};
use crate::shared::error::ApiError;
use crate::shared::trip::{convert_distance, convert_duration, Category, FareQuote, NewTripRequest, RequestStatus, TripRequest};
use crate::shared::{NewVehicle, Vehicle};

/// How often the driver feed is refreshed while connected
const FEED_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default reverse geocoding endpoint
const GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Take a finished result out of a pending-receiver slot, if any.
fn drain<T>(slot: &mut Option<Receiver<T>>) -> Option<T> {
    let rx = slot.as_ref()?;
    match rx.try_recv() {
        Ok(value) => {
            *slot = None;
            Some(value)
        }
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            *slot = None;
            None
        }
    }
}

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    pub store: Arc<SessionStore>,
    pub notifier: Notifier,
    pub auth_state: AuthState,
    pub current_view: AppView,
    pub chat: ChatState,
    pub location: LocationFeed,
    pub geocoder: Arc<dyn Geocoder>,

    // Auth form inputs
    pub name_input: String,
    pub email_input: String,
    pub phone_input: String,
    pub password_input: String,
    pub confirm_password_input: String,
    auth_result: Option<Receiver<Result<AuthSession, ApiError>>>,

    // Trip flow
    pub categories: Vec<Category>,
    pub deliveries: Vec<Category>,
    pub selected_category: Option<Category>,
    pub destination: Option<Destination>,
    /// (meters, seconds) straight-line estimate to the destination
    pub route: Option<(f64, f64)>,
    pub pos_lat_input: String,
    pub pos_lon_input: String,
    pub dest_lat_input: String,
    pub dest_lon_input: String,
    pub dest_address_input: String,
    pub payment_method: String,
    pub monitor: Option<TripMonitor>,
    categories_result: Option<Receiver<Result<(Vec<Category>, Vec<Category>), ApiError>>>,
    submit_result: Option<Receiver<Result<String, ApiError>>>,
    place_result: Option<Receiver<Result<Place, ApiError>>>,
    resume_result: Option<Receiver<Result<Option<(TripRequest, Option<Category>)>, ApiError>>>,

    // Driver side
    pub driver_online: bool,
    pub feed: Vec<TripRequest>,
    pub feed_selected: Option<TripRequest>,
    /// Requests declined from the dashboard prompt, so they stay hidden
    /// across feed refreshes
    dismissed_requests: Vec<String>,
    feed_poll: PollScheduler,
    feed_result: Option<Receiver<Result<Vec<TripRequest>, ApiError>>>,
    accept_result: Option<Receiver<Result<TripRequest, ApiError>>>,

    // Vehicles
    pub vehicles: Vec<Vehicle>,
    pub vehicle_model_input: String,
    pub vehicle_color_input: String,
    pub vehicle_plate_input: String,
    vehicles_result: Option<Receiver<Result<Vec<Vehicle>, ApiError>>>,

    // Profile / settings
    pub current_password_input: String,
    pub new_password_input: String,
    pub image_url_input: String,
    pub pin_input: String,
    pub support_input: String,
    pub notifications: Vec<Notification>,
    pub history: Vec<TripRequest>,
    notifications_result: Option<Receiver<Result<Vec<Notification>, ApiError>>>,
    history_result: Option<Receiver<Result<Vec<TripRequest>, ApiError>>>,
    /// One in-flight settings-style ack, with its success message
    ack_result: Option<(String, Receiver<Result<(), ApiError>>)>,

    /// Network connectivity state, toggled by request outcomes
    pub is_online: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_store(Arc::new(
            SessionStore::new().expect("failed to open session store"),
        ))
    }

    pub(crate) fn with_store(store: Arc<SessionStore>) -> Self {
        let config = Config::new();
        let client = ApiClient::new(config.clone());

        let mut state = Self {
            config,
            client,
            store,
            notifier: Notifier::new(),
            auth_state: AuthState::new(),
            current_view: AppView::Auth,
            chat: ChatState::new(),
            location: LocationFeed::new(),
            geocoder: Arc::new(HttpGeocoder::new(GEOCODER_URL)),
            name_input: String::new(),
            email_input: String::new(),
            phone_input: String::new(),
            password_input: String::new(),
            confirm_password_input: String::new(),
            auth_result: None,
            categories: Vec::new(),
            deliveries: Vec::new(),
            selected_category: None,
            destination: None,
            route: None,
            pos_lat_input: String::new(),
            pos_lon_input: String::new(),
            dest_lat_input: String::new(),
            dest_lon_input: String::new(),
            dest_address_input: String::new(),
            payment_method: "cash".to_string(),
            monitor: None,
            categories_result: None,
            submit_result: None,
            place_result: None,
            resume_result: None,
            driver_online: false,
            feed: Vec::new(),
            feed_selected: None,
            dismissed_requests: Vec::new(),
            feed_poll: PollScheduler::new(FEED_POLL_INTERVAL),
            feed_result: None,
            accept_result: None,
            vehicles: Vec::new(),
            vehicle_model_input: String::new(),
            vehicle_color_input: String::new(),
            vehicle_plate_input: String::new(),
            vehicles_result: None,
            current_password_input: String::new(),
            new_password_input: String::new(),
            image_url_input: String::new(),
            pin_input: String::new(),
            support_input: String::new(),
            notifications: Vec::new(),
            history: Vec::new(),
            notifications_result: None,
            history_result: None,
            ack_result: None,
            is_online: true,
        };

        if let Ok(Some(position)) = state.store.last_position() {
            state.location.set_position(position.latitude, position.longitude);
            state.pos_lat_input = position.latitude.to_string();
            state.pos_lon_input = position.longitude.to_string();
        }
        state.try_restore_session();
        state
    }

    /// Restore the session from a persisted token, off the UI thread.
    fn try_restore_session(&mut self) {
        let token = match self.store.token() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "could not read stored token");
                return;
            }
        };

        self.auth_state.loading = true;
        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(auth::restore_session(&client, &token));
        });
        self.auth_result = Some(rx);
    }

    /// Drain every pending background result. Called once per frame.
    pub fn check_results(&mut self) {
        self.check_auth_result();
        self.check_categories_result();
        self.check_submit_result();
        self.check_place_result();
        self.check_resume_result();
        self.check_feed_result();
        self.check_accept_result();
        self.check_vehicles_result();
        self.check_notifications_result();
        self.check_history_result();
        self.check_ack_result();

        let (client, user_id) = (self.client.clone(), self.user_id());
        if let Some(user_id) = user_id {
            self.chat.check_results(&client, &user_id);
        }

        self.sync_trip_view();
        self.drive_tick();
    }

    fn user_id(&self) -> Option<String> {
        self.auth_state.user.as_ref().map(|u| u.id.clone())
    }

    // --- auth ---

    fn check_auth_result(&mut self) {
        if let Some(result) = drain(&mut self.auth_result) {
            self.auth_state.loading = false;
            match result {
                Ok(session) => self.apply_session(session),
                Err(e) => {
                    // A dead stored token falls back to the login screen.
                    if let Err(err) = self.store.clear_token() {
                        warn!(error = %err, "failed to clear stale token");
                    }
                    self.auth_state.set_error(e.to_string());
                    self.current_view = AppView::Auth;
                }
            }
        }
    }

    fn apply_session(&mut self, session: AuthSession) {
        self.config.set_token(Some(session.token.clone()));
        if let Err(e) = self.store.set_token(&session.token) {
            warn!(error = %e, "failed to persist token");
        }
        self.auth_state.authenticated = true;
        self.auth_state.user = Some(session.user.clone());
        self.auth_state.error = None;
        self.current_view = AppView::Dashboard;
        self.password_input.clear();
        self.confirm_password_input.clear();

        self.register_push_token(&session.user.id);
        self.resume_active_trip();
        self.load_categories();
    }

    /// Register this install's push token in the background; failures are
    /// logged, never surfaced.
    fn register_push_token(&self, user_id: &str) {
        let token = match self.store.get::<String>("push_token") {
            Ok(Some(token)) => token,
            _ => {
                let token = Uuid::new_v4().to_string();
                if let Err(e) = self.store.set("push_token", &token) {
                    warn!(error = %e, "failed to persist push token");
                }
                token
            }
        };

        let client = self.client.clone();
        let user_id = user_id.to_string();
        std::thread::spawn(move || {
            if let Err(e) = client.register_push_token(&token, &user_id) {
                warn!(error = %e, "push token registration gave up");
            }
        });
    }

    /// Pick up a trip that was in flight when the app last closed. Falls
    /// back to the server's dashboard list when the local store has no id
    /// (e.g. the trip was submitted from another device).
    fn resume_active_trip(&mut self) {
        match self.store.active_request_id() {
            Ok(Some(request_id)) => {
                self.start_monitor(request_id);
                self.current_view = AppView::Search;
                return;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not read active request id"),
        }

        let Some(user_id) = self.user_id() else { return };
        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let result = client.dashboard_requests(&user_id).map(|requests| {
                requests
                    .into_iter()
                    .find(|r| !r.status.is_terminal())
                    .map(|active| {
                        let category = active
                            .category_id
                            .as_deref()
                            .and_then(|id| client.category(id).ok());
                        (active, category)
                    })
            });
            let _ = tx.send(result);
        });
        self.resume_result = Some(rx);
    }

    fn check_resume_result(&mut self) {
        let Some(result) = drain(&mut self.resume_result) else { return };
        let (active, category) = match result {
            Ok(Some(found)) => found,
            Ok(None) => return,
            Err(e) => {
                debug!(error = %e, "dashboard request lookup failed");
                return;
            }
        };
        if let Some(category) = category {
            self.selected_category = Some(category);
        }
        if let Err(e) = self.store.set_active_request_id(&active.id) {
            warn!(error = %e, "failed to persist recovered request id");
        }
        self.start_monitor(active.id);
        self.current_view = AppView::Search;
    }

    pub fn handle_login(&mut self) {
        if self.email_input.is_empty() || self.password_input.is_empty() {
            self.auth_state
                .set_error("Email and password are required".to_string());
            return;
        }
        self.auth_state.loading = true;
        self.auth_state.error = None;

        let client = self.client.clone();
        let email = self.email_input.clone();
        let password = self.password_input.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(auth::login(&client, &email, &password));
        });
        self.auth_result = Some(rx);
    }

    pub fn handle_register(&mut self) {
        if self.name_input.is_empty() {
            self.auth_state.set_error("Name is required".to_string());
            return;
        }
        if self.email_input.is_empty() || self.password_input.is_empty() {
            self.auth_state
                .set_error("Email and password are required".to_string());
            return;
        }
        if !self.email_input.contains('@') || !self.email_input.contains('.') {
            self.auth_state
                .set_error("Please enter a valid email address".to_string());
            return;
        }
        if self.password_input != self.confirm_password_input {
            self.auth_state
                .set_error("Passwords do not match".to_string());
            return;
        }

        self.auth_state.loading = true;
        self.auth_state.error = None;

        let client = self.client.clone();
        let request = RegisterRequest {
            name: self.name_input.clone(),
            email: self.email_input.clone(),
            phone: self.phone_input.clone(),
            password: self.password_input.clone(),
        };
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(auth::register(&client, &request));
        });
        self.auth_result = Some(rx);
    }

    pub fn logout(&mut self) {
        if let Some(mut monitor) = self.monitor.take() {
            monitor.stop();
        }
        if let Err(e) = self.store.clear_all() {
            warn!(error = %e, "failed to clear session store");
        }
        self.config.clear_token();
        self.auth_state = AuthState::new();
        self.chat = ChatState::new();
        self.current_view = AppView::Auth;
        self.driver_online = false;
        self.feed.clear();
        self.feed_selected = None;
        self.dismissed_requests.clear();
        self.destination = None;
        self.route = None;
        self.selected_category = None;
        self.name_input.clear();
        self.email_input.clear();
        self.phone_input.clear();
        self.password_input.clear();
        self.confirm_password_input.clear();
    }

    // --- categories & fare ---

    pub fn load_categories(&mut self) {
        if self.categories_result.is_some() {
            return;
        }
        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let result = client
                .categories()
                .and_then(|categories| client.deliveries().map(|deliveries| (categories, deliveries)));
            let _ = tx.send(result);
        });
        self.categories_result = Some(rx);
    }

    fn check_categories_result(&mut self) {
        if let Some(result) = drain(&mut self.categories_result) {
            match result {
                Ok((categories, deliveries)) => {
                    self.categories = categories;
                    self.deliveries = deliveries;
                    self.is_online = true;
                }
                Err(e) => {
                    warn!(error = %e, "failed to load categories");
                    if e.is_retryable() {
                        self.is_online = false;
                    }
                    self.notifier.error(e.to_string());
                }
            }
        }
    }

    /// Route distance in kilometers, after unit normalization.
    pub fn route_distance_km(&self) -> Option<f64> {
        self.route.map(|(meters, _)| convert_distance(meters))
    }

    /// Route duration in minutes, after unit normalization.
    pub fn route_duration_min(&self) -> Option<f64> {
        self.route.map(|(_, seconds)| convert_duration(seconds))
    }

    /// Fare quote for one category over the chosen route.
    pub fn quote_for(&self, category: &Category) -> FareQuote {
        match self.route_distance_km() {
            Some(distance_km) => FareQuote::quote(category, distance_km),
            None => FareQuote::zero(),
        }
    }

    /// Apply the typed destination coordinates and address.
    pub fn set_destination_from_inputs(&mut self) {
        let latitude = self.dest_lat_input.trim().parse::<f64>();
        let longitude = self.dest_lon_input.trim().parse::<f64>();
        let (Ok(latitude), Ok(longitude)) = (latitude, longitude) else {
            self.notifier.error("Destination coordinates must be numbers");
            return;
        };

        let destination = Destination {
            latitude,
            longitude,
            address: self.dest_address_input.trim().to_string(),
        };
        if let Err(e) = self.store.set_destination(&destination) {
            warn!(error = %e, "failed to persist destination");
        }

        if let Some(position) = self.location.position() {
            self.route = Some(estimate_route(
                position,
                Position {
                    latitude,
                    longitude,
                },
            ));
        }
        self.destination = Some(destination);
    }

    /// Resolve the typed coordinates into an address via the geocoder.
    pub fn lookup_destination_address(&mut self) {
        if self.place_result.is_some() {
            return;
        }
        let latitude = self.dest_lat_input.trim().parse::<f64>();
        let longitude = self.dest_lon_input.trim().parse::<f64>();
        let (Ok(latitude), Ok(longitude)) = (latitude, longitude) else {
            self.notifier.error("Destination coordinates must be numbers");
            return;
        };

        let geocoder = Arc::clone(&self.geocoder);
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(geocoder.reverse(latitude, longitude));
        });
        self.place_result = Some(rx);
    }

    fn check_place_result(&mut self) {
        if let Some(result) = drain(&mut self.place_result) {
            match result {
                Ok(place) => self.dest_address_input = place.address,
                Err(e) => self.notifier.error(format!("Address lookup failed: {}", e)),
            }
        }
    }

    /// Update the device position and persist it.
    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.location.set_position(latitude, longitude);
        if let Err(e) = self.store.set_last_position(StoredPosition {
            latitude,
            longitude,
        }) {
            warn!(error = %e, "failed to persist position");
        }
        // An already-chosen destination gets its route refreshed.
        if let Some(dest) = &self.destination {
            self.route = Some(estimate_route(
                Position {
                    latitude,
                    longitude,
                },
                Position {
                    latitude: dest.latitude,
                    longitude: dest.longitude,
                },
            ));
        }
    }

    /// Parse the typed coordinates into the device position.
    pub fn set_position_from_inputs(&mut self) {
        let latitude = self.pos_lat_input.trim().parse::<f64>();
        let longitude = self.pos_lon_input.trim().parse::<f64>();
        let (Ok(latitude), Ok(longitude)) = (latitude, longitude) else {
            self.notifier.error("Position coordinates must be numbers");
            return;
        };
        self.set_position(latitude, longitude);
        self.notifier.success("Position updated");
    }

    // --- trip submission & lifecycle ---

    pub fn submit_trip(&mut self) {
        if self.submit_result.is_some() || self.monitor.is_some() {
            return;
        }
        let Some(user) = self.auth_state.user.clone() else {
            self.notifier.error("Not signed in");
            return;
        };
        if !user.can_request() {
            self.notifier.error("Your account is blocked from requesting trips");
            return;
        }
        if !self.is_online {
            self.notifier.error("You appear to be offline; check your connection");
            return;
        }
        let Some(position) = self.location.position() else {
            self.notifier.error("Set your current position first");
            return;
        };
        let Some(destination) = self.destination.clone() else {
            self.notifier.error("Pick a destination first");
            return;
        };
        let Some(category) = self.selected_category.clone() else {
            self.notifier.error("Pick a category first");
            return;
        };
        let Some((meters, seconds)) = self.route else {
            self.notifier.error("No route to the destination");
            return;
        };

        let quote = self.quote_for(&category);
        let request_id = NewTripRequest::fresh_id();
        let request = NewTripRequest {
            user_id: user.id.clone(),
            request_id: request_id.clone(),
            category_id: category.id.clone(),
            status: RequestStatus::Process,
            info: self.dest_address_input.clone(),
            d_info: destination.address.clone(),
            pagamento: self.payment_method.clone(),
            latitude: position.latitude,
            longitude: position.longitude,
            d_latitude: destination.latitude,
            d_longitude: destination.longitude,
            distance: convert_distance(meters),
            time: convert_duration(seconds),
            valor: quote.total,
            moeda: user.currency().to_string(),
            tax_app: category.tax_app.clone().unwrap_or_default(),
            tax_km: category.tax_km.value(),
            token: user.code.clone(),
            delivery: category.delivery,
            city: user.city.clone(),
            region: user.region.clone(),
            country: user.country.clone(),
        };

        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.submit_request(&request).map(|()| request_id));
        });
        self.submit_result = Some(rx);
    }

    fn check_submit_result(&mut self) {
        if let Some(result) = drain(&mut self.submit_result) {
            match result {
                Ok(request_id) => {
                    if let Err(e) = self.store.set_active_request_id(&request_id) {
                        warn!(error = %e, "failed to persist request id");
                    }
                    self.start_monitor(request_id);
                    self.current_view = AppView::Search;
                }
                Err(e) => {
                    if e.is_retryable() {
                        self.is_online = false;
                    }
                    self.notifier.error(format!("Could not request the trip: {}", e));
                }
            }
        }
    }

    fn start_monitor(&mut self, request_id: String) {
        let monitor = TripMonitor::start(
            self.client.clone(),
            Arc::clone(&self.store),
            request_id,
            Duration::from_secs(self.config.poll_interval_secs()),
            Duration::from_secs(self.config.search_timeout_secs()),
        );
        self.monitor = Some(monitor);
    }

    pub fn cancel_trip(&mut self) {
        if let Some(monitor) = &self.monitor {
            monitor.cancel();
        }
    }

    /// Keep the current view in step with the monitor's phase.
    fn sync_trip_view(&mut self) {
        let Some(phase) = self.monitor.as_ref().map(|m| m.phase()) else {
            return;
        };
        match phase {
            TripPhase::Driving(_) if self.current_view == AppView::Search => {
                self.current_view = AppView::Drive;
            }
            TripPhase::Canceled
                if matches!(self.current_view, AppView::Search | AppView::Drive) =>
            {
                self.current_view = AppView::Cancel;
            }
            TripPhase::Ended => {
                self.monitor = None;
                if matches!(self.current_view, AppView::Search | AppView::Drive) {
                    self.current_view = AppView::Dashboard;
                }
            }
            _ => {}
        }
    }

    /// Leave the terminal cancel screen, dropping the finished monitor.
    pub fn leave_cancel_view(&mut self) {
        self.monitor = None;
        self.current_view = AppView::Dashboard;
    }

    // --- driver side ---

    pub fn toggle_driver_online(&mut self) {
        self.driver_online = !self.driver_online;
        if !self.driver_online {
            self.feed.clear();
            self.feed_selected = None;
            self.dismissed_requests.clear();
        }
    }

    /// The next nearby request worth prompting the driver about from the
    /// dashboard, if any.
    pub fn incoming_request(&self) -> Option<&TripRequest> {
        if !self.driver_online || self.monitor.is_some() {
            return None;
        }
        self.feed
            .iter()
            .find(|r| !self.dismissed_requests.contains(&r.id))
    }

    /// Hide a prompted request until the driver reconnects.
    pub fn dismiss_request(&mut self, request_id: String) {
        self.dismissed_requests.push(request_id);
    }

    /// Per-frame driver work: push location and refresh the feed, both on
    /// the poll cadence and both off the UI thread.
    fn drive_tick(&mut self) {
        if !self.driver_online {
            return;
        }
        let Some(user) = self.auth_state.user.clone() else {
            return;
        };

        if let Some(position) = self.location.take_due_position() {
            let client = self.client.clone();
            let email = user.email.clone();
            std::thread::spawn(move || {
                if let Err(e) =
                    client.update_location(&email, "desktop", position.latitude, position.longitude)
                {
                    warn!(error = %e, "location push failed");
                }
            });
        }

        if self.feed_result.is_some() || !self.feed_poll.should_poll() {
            return;
        }
        let Some(position) = self.location.position() else {
            return;
        };
        self.feed_poll.record_poll();

        let client = self.client.clone();
        let city = user.city.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            // Prefer the geo query; fall back to the city feed when the
            // profile has one and the geo query fails.
            let result = match client.nearby_requests(position.latitude, position.longitude) {
                Ok(requests) => Ok(requests),
                Err(e) => match &city {
                    Some(city) => client.open_requests_by_city(city),
                    None => Err(e),
                },
            };
            let _ = tx.send(result);
        });
        self.feed_result = Some(rx);
    }

    fn check_feed_result(&mut self) {
        if let Some(result) = drain(&mut self.feed_result) {
            match result {
                Ok(requests) => {
                    self.feed = requests;
                    self.feed_poll.record_success();
                    self.is_online = true;
                }
                Err(e) => {
                    warn!(error = %e, "driver feed refresh failed");
                    self.feed_poll.record_failure();
                    if e.is_retryable() {
                        self.is_online = false;
                    }
                }
            }
        }
    }

    pub fn accept_feed_request(&mut self, request: TripRequest) {
        if self.accept_result.is_some() {
            return;
        }
        let Some(driver_id) = self.user_id() else { return };

        let client = self.client.clone();
        let request_id = request.id.clone();
        self.feed_selected = Some(request);
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            // Re-fetch after accepting so the drive screen has the full
            // request, not the trimmed feed entry.
            let _ = tx.send(
                client
                    .accept_request(&request_id, &driver_id)
                    .and_then(|()| client.get_request_for_driver(&request_id)),
            );
        });
        self.accept_result = Some(rx);
    }

    fn check_accept_result(&mut self) {
        if let Some(result) = drain(&mut self.accept_result) {
            match result {
                Ok(request) => {
                    self.notifier.success("Request accepted");
                    if let Err(e) = self.store.set_active_request_id(&request.id) {
                        warn!(error = %e, "failed to persist request id");
                    }
                    let request_id = request.id.clone();
                    self.feed_selected = Some(request);
                    self.start_monitor(request_id);
                    self.current_view = AppView::Drive;
                }
                Err(e) => {
                    self.feed_selected = None;
                    self.notifier.error(format!("Could not accept request: {}", e));
                }
            }
        }
    }

    // --- vehicles ---

    pub fn load_vehicles(&mut self) {
        if self.vehicles_result.is_some() {
            return;
        }
        let Some(user_id) = self.user_id() else { return };
        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.vehicles(&user_id));
        });
        self.vehicles_result = Some(rx);
    }

    fn check_vehicles_result(&mut self) {
        if let Some(result) = drain(&mut self.vehicles_result) {
            match result {
                Ok(vehicles) => self.vehicles = vehicles,
                Err(e) => self.notifier.error(format!("Could not load vehicles: {}", e)),
            }
        }
    }

    pub fn add_vehicle(&mut self) {
        let Some(user_id) = self.user_id() else { return };
        let vehicle = NewVehicle {
            user_id,
            modelo: self.vehicle_model_input.trim().to_string(),
            cor: self.vehicle_color_input.trim().to_string(),
            placa: self.vehicle_plate_input.trim().to_string(),
        };
        if let Err(e) = vehicle.validate() {
            self.notifier.error(e.to_string());
            return;
        }
        self.vehicle_model_input.clear();
        self.vehicle_color_input.clear();
        self.vehicle_plate_input.clear();
        self.spawn_ack("Vehicle added", move |client| client.add_vehicle(&vehicle));
    }

    pub fn select_vehicle(&mut self, vehicle_id: String) {
        let Some(user_id) = self.user_id() else { return };
        self.spawn_ack("Active vehicle updated", move |client| {
            client.set_active_vehicle(&user_id, &vehicle_id)
        });
    }

    // --- profile & settings ---

    pub fn save_profile(&mut self) {
        let Some(user) = self.auth_state.user.clone() else { return };
        let fields = serde_json::json!({
            "email": user.email,
            "name": if self.name_input.is_empty() { user.name.clone() } else { self.name_input.clone() },
            "phone": if self.phone_input.is_empty() { user.phone.clone().unwrap_or_default() } else { self.phone_input.clone() },
        });
        self.spawn_ack("Profile updated", move |client| client.update_user(&fields));
    }

    /// Point the profile at a new image URL. The signed upload policy is
    /// requested first so the backend will accept the new image reference.
    pub fn update_profile_image(&mut self) {
        let Some(user) = self.auth_state.user.clone() else { return };
        let url = self.image_url_input.trim().to_string();
        if url.is_empty() {
            self.notifier.error("Enter an image URL first");
            return;
        }
        self.image_url_input.clear();
        self.spawn_ack("Profile photo updated", move |client| {
            client.generate_upload_policy(&user.email)?;
            client.update_user_image(&user.id, &url)
        });
    }

    pub fn change_password(&mut self) {
        let Some(user) = self.auth_state.user.clone() else { return };
        if self.new_password_input.len() < 6 {
            self.notifier.error("New password must be at least 6 characters");
            return;
        }
        if self.new_password_input != self.confirm_password_input {
            self.notifier.error("Passwords do not match");
            return;
        }
        let change = PasswordChange {
            email: user.email,
            password: self.current_password_input.clone(),
            new_password: self.new_password_input.clone(),
        };
        self.current_password_input.clear();
        self.new_password_input.clear();
        self.confirm_password_input.clear();
        self.spawn_ack("Password changed", move |client| client.update_password(&change));
    }

    pub fn change_pin(&mut self) {
        let Some(user) = self.auth_state.user.clone() else { return };
        let pin = self.pin_input.trim().to_string();
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            self.notifier.error("PIN must be exactly 4 digits");
            return;
        }
        self.pin_input.clear();
        self.spawn_ack("PIN updated", move |client| client.update_pin(&user.email, &pin));
    }

    pub fn send_support_message(&mut self) {
        let Some(user) = self.auth_state.user.clone() else { return };
        let message = self.support_input.trim().to_string();
        if message.is_empty() {
            self.notifier.error("Write a message first");
            return;
        }
        self.support_input.clear();
        self.spawn_ack("Message sent to support", move |client| {
            client.send_support_message(&user.email, &message)
        });
    }

    /// Notify another user (e.g. the driver) through the backend.
    pub fn send_user_notification(&mut self, user_id: String, title: String, message: String) {
        let notification = NewNotification {
            user_id,
            title,
            message,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.spawn_ack("Notification sent", move |client| {
            client.send_notification(&notification)
        });
    }

    fn spawn_ack<F>(&mut self, success: &str, call: F)
    where
        F: FnOnce(&ApiClient) -> Result<(), ApiError> + Send + 'static,
    {
        if self.ack_result.is_some() {
            self.notifier.info("Another change is still saving");
            return;
        }
        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(call(&client));
        });
        self.ack_result = Some((success.to_string(), rx));
    }

    fn check_ack_result(&mut self) {
        let Some((message, rx)) = self.ack_result.take() else { return };
        match rx.try_recv() {
            Ok(Ok(())) => {
                self.notifier.success(message);
                self.load_vehicles_if_visible();
            }
            Ok(Err(e)) => self.notifier.error(e.to_string()),
            Err(TryRecvError::Empty) => {
                self.ack_result = Some((message, rx));
            }
            Err(TryRecvError::Disconnected) => {}
        }
    }

    fn load_vehicles_if_visible(&mut self) {
        if self.current_view == AppView::Vehicles {
            self.load_vehicles();
        }
    }

    // --- notifications & history ---

    pub fn load_notifications(&mut self) {
        if self.notifications_result.is_some() {
            return;
        }
        let Some(user_id) = self.user_id() else { return };
        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.notifications(&user_id));
        });
        self.notifications_result = Some(rx);
    }

    fn check_notifications_result(&mut self) {
        if let Some(result) = drain(&mut self.notifications_result) {
            match result {
                Ok(notifications) => self.notifications = notifications,
                Err(e) => warn!(error = %e, "failed to load notifications"),
            }
        }
    }

    pub fn load_history(&mut self) {
        if self.history_result.is_some() {
            return;
        }
        let Some(user_id) = self.user_id() else { return };
        let client = self.client.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.request_history(&user_id));
        });
        self.history_result = Some(rx);
    }

    fn check_history_result(&mut self) {
        if let Some(result) = drain(&mut self.history_result) {
            match result {
                Ok(history) => self.history = history,
                Err(e) => warn!(error = %e, "failed to load trip history"),
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path().join("session.db")).unwrap();
        (AppState::with_store(Arc::new(store)), dir)
    }

    #[test]
    fn test_position_inputs_unlock_the_route() {
        let (mut state, _dir) = test_state();

        state.dest_lat_input = "-8.90".to_string();
        state.dest_lon_input = "13.20".to_string();
        state.set_destination_from_inputs();
        assert!(state.destination.is_some());
        assert!(state.route.is_none());

        state.pos_lat_input = "-8.83".to_string();
        state.pos_lon_input = "13.23".to_string();
        state.set_position_from_inputs();
        assert!(state.location.position().is_some());
        assert!(state.route.is_some());
    }

    #[test]
    fn test_submit_is_gated_on_position() {
        let (mut state, _dir) = test_state();
        state.auth_state.user = Some(
            serde_json::from_value(serde_json::json!({
                "_id": "u1",
                "name": "Ana",
                "email": "ana@example.com",
            }))
            .unwrap(),
        );
        state.destination = Some(Destination {
            latitude: -8.90,
            longitude: 13.20,
            address: "Downtown".to_string(),
        });

        state.submit_trip();
        assert!(state.monitor.is_none());
    }

    #[test]
    fn test_search_card_quote_follows_the_route() {
        let (mut state, _dir) = test_state();
        let category: Category = serde_json::from_value(serde_json::json!({
            "_id": "c1",
            "name": "Economy",
            "tax_km": 1.5,
            "tax_app": "10%",
            "valor": 2,
        }))
        .unwrap();

        // Nothing to quote before a route exists.
        assert_eq!(state.quote_for(&category).total, 0.0);

        state.pos_lat_input = "-8.83".to_string();
        state.pos_lon_input = "13.23".to_string();
        state.set_position_from_inputs();
        state.dest_lat_input = "-8.90".to_string();
        state.dest_lon_input = "13.20".to_string();
        state.set_destination_from_inputs();
        state.selected_category = Some(category.clone());

        assert!(state.quote_for(&category).total > 0.0);
    }

    #[test]
    fn test_bad_position_input_is_rejected() {
        let (mut state, _dir) = test_state();
        state.pos_lat_input = "north".to_string();
        state.pos_lon_input = "13.23".to_string();
        state.set_position_from_inputs();
        assert!(state.location.position().is_none());
    }
}
