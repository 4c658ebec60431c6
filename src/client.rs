//! Hyperwallet client
//!
//! [`HyperwalletClient`] is an explicitly constructed object holding the
//! configuration, the token provider and the request pipeline. Every endpoint
//! comes in an async form returning `Result<Option<T>, _>` (`None` for no
//! content) and, where useful, a listener form that runs the call on the
//! tokio worker pool and reports through the result dispatcher.

use crate::auth::TokenProvider;
use crate::config::ClientConfig;
use crate::decode::{Decode, decode};
use crate::dispatch::{Listener, Scheduler, deliver};
use crate::error::HyperwalletError;
use crate::execution::http::interceptor::HttpInterceptor;
use crate::execution::http::transport::{HttpTransport, ReqwestTransport};
use crate::execution::{RequestDescriptor, RequestPipeline};
use crate::model::graphql::{TransferMethodConfigurationKeys, TransferMethodConfigurationKeysQuery};
use crate::model::transfer_method::{TOKEN, TYPE, resource_path_for};
use crate::model::{
    BankAccount, BankCard, JsonModel, PageList, PayPalAccount, PrepaidCard, PrepaidCardQueryParam,
    QueryParams, Receipt, ReceiptQueryParam, StatusTransition, TransferMethod,
    TransferMethodQueryParam,
};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

const BANK_ACCOUNTS: &str = "bank-accounts";
const BANK_CARDS: &str = "bank-cards";
const PAYPAL_ACCOUNTS: &str = "paypal-accounts";
const PREPAID_CARDS: &str = "prepaid-cards";
const TRANSFER_METHODS: &str = "transfer-methods";
const RECEIPTS: &str = "receipts";
const STATUS_TRANSITIONS: &str = "status-transitions";

pub struct HyperwalletClient {
    config: ClientConfig,
    pipeline: RequestPipeline,
    scheduler: Option<Arc<dyn Scheduler>>,
    runtime: Option<Handle>,
}

#[derive(Default)]
pub struct HyperwalletClientBuilder {
    config: Option<ClientConfig>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    transport: Option<Arc<dyn HttpTransport>>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    runtime: Option<Handle>,
}

impl HyperwalletClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Replace the default reqwest transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Default execution context for listener callbacks. Without one,
    /// callbacks run on the worker that completed the call.
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Runtime used by the listener API when called outside a tokio context.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn build(self) -> Result<HyperwalletClient, HyperwalletError> {
        let config = match self.config {
            Some(c) => c,
            None => ClientConfig::from_env()?,
        };
        let token_provider = self.token_provider.ok_or_else(|| {
            HyperwalletError::ConfigurationError("a token provider is required".to_string())
        })?;
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::with_timeouts(
                config.timeout,
                config.connect_timeout,
            )?),
        };

        let pipeline = RequestPipeline::new(config.base_url.clone(), transport, token_provider)
            .with_interceptors(self.interceptors)
            .with_default_headers(config.headers.clone())
            .with_user_agent(config.user_agent.clone())
            .with_retry_401(config.retry_401);

        tracing::debug!(target: "hyperwallet::client", base_url=%config.base_url, "client configured");

        Ok(HyperwalletClient {
            config,
            pipeline,
            scheduler: self.scheduler,
            runtime: self.runtime,
        })
    }
}

impl HyperwalletClient {
    pub fn builder() -> HyperwalletClientBuilder {
        HyperwalletClientBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    // -------------------------------------------------------------------------
    // Core entry points
    // -------------------------------------------------------------------------

    /// Execute a descriptor and decode the body into `T`.
    pub async fn call<T: Decode>(
        &self,
        descriptor: RequestDescriptor<T>,
    ) -> Result<Option<T>, HyperwalletError> {
        let raw = self.pipeline.execute(&descriptor).await?;
        decode::<T>(&raw)
    }

    /// Run a descriptor on the worker pool and report through `listener` on
    /// the client's scheduler.
    ///
    /// Returns the task handle, or `None` when no runtime is available (the
    /// listener then receives a configuration failure).
    pub fn submit<T, L>(&self, descriptor: RequestDescriptor<T>, listener: L) -> Option<JoinHandle<()>>
    where
        T: Decode,
        L: Listener<T>,
    {
        self.submit_on(descriptor, listener, self.scheduler.clone())
    }

    /// Like [`submit`](Self::submit) with an explicit scheduler for this call.
    pub fn submit_on<T, L>(
        &self,
        descriptor: RequestDescriptor<T>,
        listener: L,
        scheduler: Option<Arc<dyn Scheduler>>,
    ) -> Option<JoinHandle<()>>
    where
        T: Decode,
        L: Listener<T>,
    {
        let Some(handle) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            deliver::<T, L>(
                Err(HyperwalletError::ConfigurationError(
                    "no tokio runtime available for the listener API".to_string(),
                )),
                listener,
                scheduler.as_ref(),
            );
            return None;
        };
        let pipeline = self.pipeline.clone();
        Some(handle.spawn(async move {
            let result = pipeline.execute(&descriptor).await;
            deliver::<T, L>(result, listener, scheduler.as_ref());
        }))
    }

    fn submit_request<T, L>(
        &self,
        descriptor: Result<RequestDescriptor<T>, HyperwalletError>,
        listener: L,
    ) -> Option<JoinHandle<()>>
    where
        T: Decode,
        L: Listener<T>,
    {
        match descriptor {
            Ok(d) => self.submit(d, listener),
            Err(e) => {
                deliver::<T, L>(Err(e), listener, self.scheduler.as_ref());
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Transfer methods
    // -------------------------------------------------------------------------

    pub async fn create_bank_account(
        &self,
        account: &BankAccount,
    ) -> Result<Option<BankAccount>, HyperwalletError> {
        self.call(self.create_request(BANK_ACCOUNTS, account)?).await
    }

    pub fn create_bank_account_with_listener<L: Listener<BankAccount>>(
        &self,
        account: &BankAccount,
        listener: L,
    ) -> Option<JoinHandle<()>> {
        self.submit_request(self.create_request(BANK_ACCOUNTS, account), listener)
    }

    pub async fn create_bank_card(
        &self,
        card: &BankCard,
    ) -> Result<Option<BankCard>, HyperwalletError> {
        self.call(self.create_request(BANK_CARDS, card)?).await
    }

    pub fn create_bank_card_with_listener<L: Listener<BankCard>>(
        &self,
        card: &BankCard,
        listener: L,
    ) -> Option<JoinHandle<()>> {
        self.submit_request(self.create_request(BANK_CARDS, card), listener)
    }

    pub async fn create_paypal_account(
        &self,
        account: &PayPalAccount,
    ) -> Result<Option<PayPalAccount>, HyperwalletError> {
        self.call(self.create_request(PAYPAL_ACCOUNTS, account)?).await
    }

    pub fn create_paypal_account_with_listener<L: Listener<PayPalAccount>>(
        &self,
        account: &PayPalAccount,
        listener: L,
    ) -> Option<JoinHandle<()>> {
        self.submit_request(self.create_request(PAYPAL_ACCOUNTS, account), listener)
    }

    pub async fn get_bank_account(
        &self,
        token: &str,
    ) -> Result<Option<BankAccount>, HyperwalletError> {
        self.call(RequestDescriptor::get(self.resource_path(BANK_ACCOUNTS, token)))
            .await
    }

    pub async fn get_bank_card(&self, token: &str) -> Result<Option<BankCard>, HyperwalletError> {
        self.call(RequestDescriptor::get(self.resource_path(BANK_CARDS, token)))
            .await
    }

    pub async fn get_paypal_account(
        &self,
        token: &str,
    ) -> Result<Option<PayPalAccount>, HyperwalletError> {
        self.call(RequestDescriptor::get(self.resource_path(PAYPAL_ACCOUNTS, token)))
            .await
    }

    pub async fn get_prepaid_card(
        &self,
        token: &str,
    ) -> Result<Option<PrepaidCard>, HyperwalletError> {
        self.call(RequestDescriptor::get(self.resource_path(PREPAID_CARDS, token)))
            .await
    }

    /// Update a bank card; the card must carry its `token`.
    pub async fn update_bank_card(
        &self,
        card: &BankCard,
    ) -> Result<Option<BankCard>, HyperwalletError> {
        let token = required_field(card, TOKEN)?;
        let descriptor =
            RequestDescriptor::put(self.resource_path(BANK_CARDS, token)).json_body(card)?;
        self.call(descriptor).await
    }

    /// Move a transfer method to `DE_ACTIVATED`.
    ///
    /// The method must carry its `type` and `token`.
    pub async fn deactivate_transfer_method<M: JsonModel>(
        &self,
        transfer_method: &M,
        notes: Option<&str>,
    ) -> Result<Option<StatusTransition>, HyperwalletError> {
        self.call(self.deactivate_request(transfer_method, notes)?)
            .await
    }

    pub async fn list_transfer_methods(
        &self,
        params: &TransferMethodQueryParam,
    ) -> Result<Option<PageList<TransferMethod>>, HyperwalletError> {
        self.call(self.list_request(TRANSFER_METHODS, params)).await
    }

    pub fn list_transfer_methods_with_listener<L: Listener<PageList<TransferMethod>>>(
        &self,
        params: &TransferMethodQueryParam,
        listener: L,
    ) -> Option<JoinHandle<()>> {
        self.submit(self.list_request(TRANSFER_METHODS, params), listener)
    }

    pub async fn list_prepaid_cards(
        &self,
        params: &PrepaidCardQueryParam,
    ) -> Result<Option<PageList<PrepaidCard>>, HyperwalletError> {
        self.call(self.list_request(PREPAID_CARDS, params)).await
    }

    // -------------------------------------------------------------------------
    // Receipts
    // -------------------------------------------------------------------------

    pub async fn list_user_receipts(
        &self,
        params: &ReceiptQueryParam,
    ) -> Result<Option<PageList<Receipt>>, HyperwalletError> {
        self.call(self.list_request(RECEIPTS, params)).await
    }

    pub fn list_user_receipts_with_listener<L: Listener<PageList<Receipt>>>(
        &self,
        params: &ReceiptQueryParam,
        listener: L,
    ) -> Option<JoinHandle<()>> {
        self.submit(self.list_request(RECEIPTS, params), listener)
    }

    pub async fn list_prepaid_card_receipts(
        &self,
        prepaid_card_token: &str,
        params: &ReceiptQueryParam,
    ) -> Result<Option<PageList<Receipt>>, HyperwalletError> {
        self.call(self.prepaid_card_receipts_request(prepaid_card_token, params))
            .await
    }

    pub fn list_prepaid_card_receipts_with_listener<L: Listener<PageList<Receipt>>>(
        &self,
        prepaid_card_token: &str,
        params: &ReceiptQueryParam,
        listener: L,
    ) -> Option<JoinHandle<()>> {
        self.submit(
            self.prepaid_card_receipts_request(prepaid_card_token, params),
            listener,
        )
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub async fn retrieve_transfer_method_configuration_keys(
        &self,
    ) -> Result<Option<TransferMethodConfigurationKeys>, HyperwalletError> {
        self.call(self.configuration_keys_request()?).await
    }

    pub fn retrieve_transfer_method_configuration_keys_with_listener<
        L: Listener<TransferMethodConfigurationKeys>,
    >(
        &self,
        listener: L,
    ) -> Option<JoinHandle<()>> {
        self.submit_request(self.configuration_keys_request(), listener)
    }

    // -------------------------------------------------------------------------
    // Descriptor builders
    // -------------------------------------------------------------------------

    fn collection_path(&self, collection: &str) -> String {
        self.config.user_path(&format!("/{collection}"))
    }

    fn resource_path(&self, collection: &str, token: &str) -> String {
        self.config
            .user_path(&format!("/{collection}/{}", urlencoding::encode(token)))
    }

    fn create_request<M>(
        &self,
        collection: &str,
        model: &M,
    ) -> Result<RequestDescriptor<M>, HyperwalletError>
    where
        M: Decode + serde::Serialize,
    {
        RequestDescriptor::post(self.collection_path(collection)).json_body(model)
    }

    fn list_request<T: Decode, Q: QueryParams>(
        &self,
        collection: &str,
        params: &Q,
    ) -> RequestDescriptor<T> {
        RequestDescriptor::get(self.collection_path(collection)).queries(params.build_query())
    }

    fn prepaid_card_receipts_request(
        &self,
        prepaid_card_token: &str,
        params: &ReceiptQueryParam,
    ) -> RequestDescriptor<PageList<Receipt>> {
        let path = format!(
            "{}/{RECEIPTS}",
            self.resource_path(PREPAID_CARDS, prepaid_card_token)
        );
        RequestDescriptor::get(path).queries(params.build_query())
    }

    fn deactivate_request<M: JsonModel>(
        &self,
        transfer_method: &M,
        notes: Option<&str>,
    ) -> Result<RequestDescriptor<StatusTransition>, HyperwalletError> {
        let token = required_field(transfer_method, TOKEN)?;
        let kind = required_field(transfer_method, TYPE)?;
        let collection = resource_path_for(kind).ok_or_else(|| {
            HyperwalletError::InvalidInput(format!("unsupported transfer method type: {kind}"))
        })?;
        let path = format!(
            "{}/{STATUS_TRANSITIONS}",
            self.resource_path(collection, token)
        );
        RequestDescriptor::post(path).json_body(&StatusTransition::deactivate(notes))
    }

    fn configuration_keys_request(
        &self,
    ) -> Result<RequestDescriptor<TransferMethodConfigurationKeys>, HyperwalletError> {
        let body = TransferMethodConfigurationKeysQuery::new().to_request_body(&self.config.user_token);
        RequestDescriptor::post(self.config.graphql_path.clone()).json_body(&body)
    }
}

fn required_field<'a, M: JsonModel>(model: &'a M, key: &str) -> Result<&'a str, HyperwalletError> {
    model
        .field_str(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HyperwalletError::InvalidInput(format!("`{key}` is required")))
}

impl fmt::Debug for HyperwalletClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperwalletClient")
            .field("base_url", &self.config.base_url)
            .field("pipeline", &self.pipeline)
            .field("has_scheduler", &self.scheduler.is_some())
            .finish()
    }
}
