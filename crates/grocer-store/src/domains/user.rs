//! Signed-in user: profile, address book and the checkout address.

use std::sync::Arc;

use async_trait::async_trait;
use grocer_commerce::account::{Address, AddressDraft, AddressPatch, UserProfile};
use grocer_commerce::ids::AddressId;
use grocer_data::{ApiError, Mutate, Session};

use super::shared;
use crate::action::Action;
use crate::effects::Effects;
use crate::operation::Operation;
use crate::provider::Mount;
use crate::resource::{ResourceState, Slot};
use crate::store::{Reducer, Store};

#[derive(Debug, Clone)]
pub enum UserAction {
    GetUserStart,
    GetUserSuccess(Arc<UserProfile>),
    GetUserFailure(String),

    GetAddressesStart,
    GetAddressesSuccess(Vec<Arc<Address>>),
    GetAddressesFailure(String),

    AddAddressStart,
    AddAddressSuccess(Arc<Address>),
    AddAddressFailure(String),

    UpdateAddressStart,
    UpdateAddressSuccess(Arc<Address>),
    UpdateAddressFailure(String),

    DeleteAddressStart,
    DeleteAddressSuccess(Option<AddressId>),
    DeleteAddressFailure(String),

    /// Choose the delivery address used at checkout.
    SelectAddress(Option<AddressId>),
    /// Forget everything about the user.
    SignOut,
}

impl UserAction {
    pub fn tag(&self) -> &'static str {
        use UserAction::*;
        match self {
            GetUserStart => "GET_USER_START",
            GetUserSuccess(_) => "GET_USER_SUCCESS",
            GetUserFailure(_) => "GET_USER_FAILURE",
            GetAddressesStart => "GET_ADDRESSES_START",
            GetAddressesSuccess(_) => "GET_ADDRESSES_SUCCESS",
            GetAddressesFailure(_) => "GET_ADDRESSES_FAILURE",
            AddAddressStart => "ADD_ADDRESS_START",
            AddAddressSuccess(_) => "ADD_ADDRESS_SUCCESS",
            AddAddressFailure(_) => "ADD_ADDRESS_FAILURE",
            UpdateAddressStart => "UPDATE_ADDRESS_START",
            UpdateAddressSuccess(_) => "UPDATE_ADDRESS_SUCCESS",
            UpdateAddressFailure(_) => "UPDATE_ADDRESS_FAILURE",
            DeleteAddressStart => "DELETE_ADDRESS_START",
            DeleteAddressSuccess(_) => "DELETE_ADDRESS_SUCCESS",
            DeleteAddressFailure(_) => "DELETE_ADDRESS_FAILURE",
            SelectAddress(_) => "SELECT_ADDRESS",
            SignOut => "SIGN_OUT",
        }
    }
}

/// User domain state.
///
/// `addresses.error` holds the last failure of any user operation, profile
/// fetches included. `addresses.selected` is the checkout address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub profile: Option<Arc<UserProfile>>,
    pub profile_loading: bool,
    pub addresses: ResourceState<Address>,
}

impl UserState {
    pub fn error(&self) -> Option<&str> {
        self.addresses.error.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.profile.is_some()
    }

    pub fn selected_address(&self) -> Option<&Arc<Address>> {
        self.addresses.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.profile_loading || self.addresses.is_loading()
    }
}

pub struct UserReducer;

impl Reducer for UserReducer {
    type State = UserState;
    const DOMAIN: &'static str = "user";

    fn reduce(state: &Arc<UserState>, action: &Action) -> Arc<UserState> {
        let Action::User(action) = action else {
            return Arc::clone(state);
        };
        Arc::new(reduce(state, action))
    }
}

fn reduce(state: &UserState, action: &UserAction) -> UserState {
    use UserAction::*;

    let addresses = &state.addresses;
    let addresses = match action {
        GetUserStart => {
            return UserState {
                profile_loading: true,
                addresses: ResourceState {
                    error: None,
                    ..addresses.clone()
                },
                ..state.clone()
            }
        }
        GetUserSuccess(profile) => {
            return UserState {
                profile: Some(Arc::clone(profile)),
                profile_loading: false,
                addresses: ResourceState {
                    error: None,
                    ..addresses.clone()
                },
            }
        }
        GetUserFailure(message) => {
            return UserState {
                profile: None,
                profile_loading: false,
                addresses: ResourceState {
                    error: Some(message.clone()),
                    ..addresses.clone()
                },
            }
        }
        SignOut => return UserState::default(),

        GetAddressesStart => addresses.started(Slot::Collection),
        GetAddressesSuccess(list) => {
            let selected = addresses.selected.as_ref().map(|a| a.id.clone());
            addresses.collection_loaded(list).focused(selected.as_ref())
        }
        GetAddressesFailure(message) => addresses.collection_failed(message).focused(None),

        AddAddressStart | UpdateAddressStart | DeleteAddressStart => {
            addresses.started(Slot::Mutation)
        }
        AddAddressSuccess(address) => addresses.added(address),
        UpdateAddressSuccess(address) => {
            // Editing an address must not move the checkout selection.
            let selected = addresses.selected.as_ref().map(|a| a.id.clone());
            addresses.updated(address).focused(selected.as_ref())
        }
        DeleteAddressSuccess(id) => addresses.deleted(id.as_ref()),
        AddAddressFailure(message)
        | UpdateAddressFailure(message)
        | DeleteAddressFailure(message) => addresses.mutation_failed(message),

        SelectAddress(id) => addresses.focused(id.as_ref()),
    };

    UserState {
        addresses,
        ..state.clone()
    }
}

/// User store plus the session and address-book collaborators.
#[derive(Clone)]
pub struct UserContext {
    store: Store<UserReducer>,
    session: Arc<dyn Session>,
    addresses: Arc<dyn Mutate<Address>>,
    effects: Effects,
}

impl UserContext {
    pub fn new(
        session: Arc<dyn Session>,
        addresses: Arc<dyn Mutate<Address>>,
        effects: Effects,
    ) -> Self {
        Self {
            store: Store::new(),
            session,
            addresses,
            effects,
        }
    }

    pub fn store(&self) -> &Store<UserReducer> {
        &self.store
    }

    pub fn state(&self) -> Arc<UserState> {
        self.store.state()
    }

    pub fn dispatch(&self, action: UserAction) {
        self.store.dispatch(action);
    }

    fn operation(&self, name: &'static str) -> Operation<'_> {
        Operation::new(UserReducer::DOMAIN, name, &self.effects)
    }

    pub async fn get_profile(&self) -> Result<Arc<UserProfile>, ApiError> {
        self.dispatch(UserAction::GetUserStart);
        self.operation("get_profile")
            .run(
                self.session.current_user(),
                |profile| {
                    let profile = Arc::new(profile);
                    self.dispatch(UserAction::GetUserSuccess(Arc::clone(&profile)));
                    profile
                },
                |error| self.dispatch(UserAction::GetUserFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn get_addresses(&self) -> Result<Vec<Arc<Address>>, ApiError> {
        self.dispatch(UserAction::GetAddressesStart);
        self.operation("get_addresses")
            .run(
                self.addresses.fetch_collection(),
                |list| {
                    let list = shared(list);
                    self.dispatch(UserAction::GetAddressesSuccess(list.clone()));
                    list
                },
                |error| self.dispatch(UserAction::GetAddressesFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn add_address(&self, draft: AddressDraft) -> Result<Arc<Address>, ApiError> {
        self.dispatch(UserAction::AddAddressStart);
        self.operation("add_address")
            .announce("Address added")
            .run(
                self.addresses.create(&draft),
                |address| {
                    let address = Arc::new(address);
                    self.dispatch(UserAction::AddAddressSuccess(Arc::clone(&address)));
                    address
                },
                |error| self.dispatch(UserAction::AddAddressFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn update_address(
        &self,
        id: &AddressId,
        patch: AddressPatch,
    ) -> Result<Arc<Address>, ApiError> {
        self.dispatch(UserAction::UpdateAddressStart);
        self.operation("update_address")
            .announce("Address updated")
            .run(
                self.addresses.update(id, &patch),
                |address| {
                    let address = Arc::new(address);
                    self.dispatch(UserAction::UpdateAddressSuccess(Arc::clone(&address)));
                    address
                },
                |error| {
                    self.dispatch(UserAction::UpdateAddressFailure(error.message().to_string()))
                },
            )
            .await
    }

    pub async fn delete_address(&self, id: &AddressId) -> Result<(), ApiError> {
        self.dispatch(UserAction::DeleteAddressStart);
        self.operation("delete_address")
            .announce("Address deleted")
            .run(
                self.addresses.delete(id),
                |()| self.dispatch(UserAction::DeleteAddressSuccess(Some(id.clone()))),
                |error| {
                    self.dispatch(UserAction::DeleteAddressFailure(error.message().to_string()))
                },
            )
            .await
    }

    /// Choose the checkout address. Unknown ids clear the selection.
    pub fn select_address(&self, id: Option<AddressId>) {
        self.dispatch(UserAction::SelectAddress(id));
    }

    pub fn sign_out(&self) {
        self.dispatch(UserAction::SignOut);
    }
}

#[async_trait]
impl Mount for UserContext {
    const NAME: &'static str = "user";

    async fn on_mount(&self) {
        let _ = futures::join!(self.get_profile(), self.get_addresses());
    }
}
