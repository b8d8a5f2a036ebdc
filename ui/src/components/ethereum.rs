//! `window.ethereum` as an [`RpcTransport`].

use std::time::Duration;

use alloy_primitives::Address;
use serde_json::Value;
use skilldao_client::rpc::{RpcError, RpcTransport};

#[cfg(target_family = "wasm")]
mod wasm_impl {
    use serde::Serialize;
    use serde_json::{json, Value};
    use skilldao_client::rpc::RpcError;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use alloy_primitives::Address;

    fn method(target: &JsValue, name: &str) -> Result<js_sys::Function, RpcError> {
        js_sys::Reflect::get(target, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| RpcError::internal(format!("window.ethereum.{name} is not a function")))
    }

    fn to_js(value: &Value) -> Result<JsValue, RpcError> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| RpcError::internal(e.to_string()))
    }

    /// Wallet errors are `{ code, message }` objects; anything else is internal.
    fn to_rpc_error(err: JsValue) -> RpcError {
        serde_wasm_bindgen::from_value::<RpcError>(err.clone())
            .unwrap_or_else(|_| RpcError::internal(format!("{err:?}")))
    }

    pub fn detect() -> Option<JsValue> {
        let window = web_sys::window()?;
        let provider = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        (!provider.is_undefined() && !provider.is_null()).then_some(provider)
    }

    pub async fn request(provider: &JsValue, name: &str, params: Value) -> Result<Value, RpcError> {
        let args = to_js(&json!({ "method": name, "params": params }))?;
        let promise = method(provider, "request")?
            .call1(provider, &args)
            .map_err(to_rpc_error)?;
        let result = JsFuture::from(js_sys::Promise::from(promise))
            .await
            .map_err(to_rpc_error)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result).map_err(|e| RpcError::internal(e.to_string()))
    }

    /// Register an `accountsChanged` listener that lives as long as the page.
    pub fn on_accounts_changed(provider: &JsValue, mut callback: impl FnMut(Vec<Address>) + 'static) {
        let Ok(on) = method(provider, "on") else {
            web_sys::console::warn_1(&JsValue::from_str("wallet has no event subscription"));
            return;
        };
        let listener = Closure::wrap(Box::new(move |accounts: JsValue| {
            let accounts: Vec<Address> = serde_wasm_bindgen::from_value(accounts).unwrap_or_default();
            callback(accounts);
        }) as Box<dyn FnMut(JsValue)>);
        if let Err(e) = on.call2(
            provider,
            &JsValue::from_str("accountsChanged"),
            listener.as_ref().unchecked_ref(),
        ) {
            web_sys::console::warn_1(&e);
        }
        listener.forget();
    }
}

/// The injected browser wallet, if the page has one.
#[derive(Clone)]
pub struct BrowserEthereum {
    #[cfg(target_family = "wasm")]
    provider: wasm_bindgen::JsValue,
}

impl BrowserEthereum {
    #[cfg(target_family = "wasm")]
    pub fn detect() -> Option<Self> {
        wasm_impl::detect().map(|provider| Self { provider })
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn detect() -> Option<Self> {
        None
    }

    #[cfg(target_family = "wasm")]
    pub fn on_accounts_changed(&self, callback: impl FnMut(Vec<Address>) + 'static) {
        wasm_impl::on_accounts_changed(&self.provider, callback);
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn on_accounts_changed(&self, _callback: impl FnMut(Vec<Address>) + 'static) {}
}

impl RpcTransport for BrowserEthereum {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        #[cfg(target_family = "wasm")]
        {
            wasm_impl::request(&self.provider, method, params).await
        }
        #[cfg(not(target_family = "wasm"))]
        {
            let _ = params;
            Err(RpcError::internal(format!("{method}: browser wallet only available in WASM")))
        }
    }

    async fn pause(&self, duration: Duration) {
        #[cfg(target_family = "wasm")]
        gloo_timers::future::TimeoutFuture::new(duration.as_millis().min(u128::from(u32::MAX)) as u32)
            .await;
        #[cfg(not(target_family = "wasm"))]
        let _ = duration;
    }
}
