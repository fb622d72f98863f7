//! Entry point tests against an in-process stub module.
//!
//! `test_softhsm2_session` runs against a real module and is ignored by
//! default:
//!
//! ```bash
//! PKCS11_MODULE=/usr/lib/softhsm/libsofthsm2.so cargo test -p cosmian_pkcs11_wrapper -- --ignored
//! ```

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use cosmian_pkcs11_sys::*;
use serial_test::serial;

use crate::{
    Attribute, CharEncoding, DefaultMutexHandler, InitializeArgs, Mechanism, MechanismParameters,
    ModuleHandle, Pkcs11, Value, WResult, WrapperError,
    logging::log_init,
    mechanism::{PbeParams, Ssl3KeyMatOut, Ssl3KeyMatParams, Ssl3RandomData},
    registry::{connection::ModuleData, notify::ThreadRuntime},
};


fn connect(module: ModuleData) -> WResult<(Pkcs11, ModuleHandle)> {
    log_init("info,cosmian_pkcs11_wrapper=debug");
    stub::reset();
    let pkcs11 = Pkcs11::default();
    let handle = pkcs11.connect_module(module)?;
    Ok((pkcs11, handle))
}

fn connect_stub() -> WResult<(Pkcs11, ModuleHandle)> {
    connect(stub::module(|_| {}))
}

#[test]
#[serial]
fn test_info_and_slots() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    pkcs11.initialize(&h, None)?;

    let info = pkcs11.get_info(&h, CharEncoding::Utf8)?;
    assert_eq!(info.manufacturer_id, "Stub Inc.");
    assert_eq!(info.library_description, "Stub module");

    assert_eq!(pkcs11.get_slot_list(&h, false)?, vec![1, 7]);
    assert_eq!(pkcs11.get_slot_list(&h, true)?, vec![7]);

    let slot = pkcs11.get_slot_info(&h, 7, CharEncoding::Utf8)?;
    assert_eq!(slot.slot_description, "Stub slot");
    assert!(slot.token_present());
    let e = pkcs11
        .get_slot_info(&h, 3, CharEncoding::Utf8)
        .unwrap_err();
    assert_eq!(e.code(), CKR_SLOT_ID_INVALID);

    assert_eq!(
        pkcs11.get_mechanism_list(&h, 7)?,
        vec![CKM_AES_CBC, CKM_SHA256_RSA_PKCS]
    );

    pkcs11.finalize(&h)?;
    Ok(())
}

#[test]
#[serial]
fn test_mutex_callbacks_during_initialize() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let args = InitializeArgs::new(0).with_mutex_handler(Arc::new(DefaultMutexHandler));
    pkcs11.initialize(&h, Some(&args))?;
    assert_eq!(stub::state().mutex_calls, vec![CKR_OK; 4]);
    pkcs11.finalize(&h)?;
    Ok(())
}

#[test]
#[serial]
fn test_disconnected_module() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    assert!(pkcs11.is_connected(&h)?);
    pkcs11.disconnect(&h)?;
    assert!(!pkcs11.is_connected(&h)?);

    let e = pkcs11.get_slot_list(&h, false).unwrap_err();
    assert!(matches!(e, WrapperError::Disconnected));
    assert!(matches!(
        pkcs11.disconnect(&h).unwrap_err(),
        WrapperError::Disconnected
    ));

    // handles compare by identity
    let other = pkcs11.connect_module(stub::module(|_| {}))?;
    assert_ne!(other, h);
    pkcs11.disconnect_all()?;
    assert!(!pkcs11.is_connected(&other)?);
    Ok(())
}

#[test]
#[serial]
fn test_missing_entry_is_not_supported() -> WResult<()> {
    let (pkcs11, h) = connect(stub::module(|f| f.C_Sign = None))?;
    let e = pkcs11.sign(&h, stub::SESSION, b"data").unwrap_err();
    assert!(matches!(e, WrapperError::FunctionNotSupported("C_Sign")));
    assert_eq!(e.code(), CKR_FUNCTION_NOT_SUPPORTED);
    // entries the stub never provided
    let e = pkcs11.digest_key(&h, stub::SESSION, 1).unwrap_err();
    assert!(matches!(e, WrapperError::FunctionNotSupported("C_DigestKey")));
    Ok(())
}

#[test]
#[serial]
fn test_token_label_and_pin() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    pkcs11.init_token(&h, 7, Some("so-pin"), "token", CharEncoding::Utf8)?;
    let label = stub::state().token_label.clone();
    assert_eq!(&label[..5], b"token");
    assert!(label[5..].iter().all(|b| *b == b' '));
    assert_eq!(label.len(), 32);

    let e = pkcs11
        .login(&h, stub::SESSION, CKU_USER, Some("0000"), CharEncoding::Utf8)
        .unwrap_err();
    assert_eq!(e.code(), CKR_PIN_INCORRECT);
    pkcs11.login(&h, stub::SESSION, CKU_USER, Some("1234"), CharEncoding::Utf8)?;
    // protected authentication path
    assert!(
        pkcs11
            .login(&h, stub::SESSION, CKU_USER, None, CharEncoding::Utf8)
            .is_err()
    );
    let pins = stub::state().pins.clone();
    assert_eq!(pins, vec![b"0000".to_vec(), stub::USER_PIN.to_vec(), vec![]]);
    Ok(())
}

#[test]
#[serial]
fn test_notifications_until_close() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let callback = Arc::new(
        move |session: CK_SESSION_HANDLE,
              event: CK_NOTIFICATION,
              application: Option<&(dyn std::any::Any + Send + Sync)>|
              -> WResult<()> {
            let tag = application
                .and_then(|a| a.downcast_ref::<&'static str>())
                .copied()
                .unwrap_or_default();
            sink.lock()
                .map_err(|e| WrapperError::Default(e.to_string()))?
                .push((session, event, tag));
            Ok(())
        },
    );
    let session = pkcs11.open_session(
        &h,
        7,
        CKF_SERIAL_SESSION | CKF_RW_SESSION,
        Some(Arc::new("app")),
        Some(callback),
    )?;
    assert_eq!(session, stub::SESSION);
    assert_eq!(h.notifications().len()?, 1);

    assert_eq!(stub::surrender(), CKR_OK);
    assert_eq!(
        *received.lock().unwrap(),
        vec![(stub::SESSION, CKN_SURRENDER, "app")]
    );

    pkcs11.close_session(&h, session)?;
    assert!(h.notifications().is_empty()?);
    // a late notification finds no callback
    assert_eq!(stub::surrender(), CKR_OK);
    assert_eq!(received.lock().unwrap().len(), 1);
    Ok(())
}

#[test]
#[serial]
fn test_callbacks_are_scoped_to_their_module() -> WResult<()> {
    let (pkcs11, a) = connect_stub()?;
    let b = pkcs11.connect_module(stub::module(|_| {}))?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let tagged = |tag: &'static str| {
        let sink = received.clone();
        Arc::new(
            move |_: CK_SESSION_HANDLE,
                  _: CK_NOTIFICATION,
                  _: Option<&(dyn std::any::Any + Send + Sync)>|
                  -> WResult<()> {
                sink.lock()
                    .map_err(|e| WrapperError::Default(e.to_string()))?
                    .push(tag);
                Ok(())
            },
        )
    };

    // both modules hand out the same session handle
    let session_a = pkcs11.open_session(&a, 7, CKF_SERIAL_SESSION, None, Some(tagged("a")))?;
    let target_a = stub::last_notify_target();
    let session_b = pkcs11.open_session(&b, 7, CKF_SERIAL_SESSION, None, Some(tagged("b")))?;
    let target_b = stub::last_notify_target();
    assert_eq!(session_a, session_b);
    assert_eq!(a.notifications().len()?, 1);
    assert_eq!(b.notifications().len()?, 1);

    assert_eq!(stub::surrender_to(target_b), CKR_OK);
    assert_eq!(*received.lock().unwrap(), vec!["b"]);

    pkcs11.close_all_sessions(&b, 7)?;
    assert!(b.notifications().is_empty()?);
    assert_eq!(a.notifications().len()?, 1);
    assert_eq!(stub::surrender_to(target_a), CKR_OK);
    assert_eq!(stub::surrender_to(target_b), CKR_OK);
    assert_eq!(*received.lock().unwrap(), vec!["b", "a"]);

    pkcs11.close_session(&a, session_a)?;
    assert!(a.notifications().is_empty()?);
    Ok(())
}

#[test]
#[serial]
fn test_session_without_callback() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    pkcs11.open_session(&h, 7, CKF_SERIAL_SESSION, None, None)?;
    assert!(stub::state().notify.is_none());
    assert!(h.notifications().is_empty()?);
    pkcs11.close_all_sessions(&h, 7)?;
    Ok(())
}

#[test]
#[serial]
fn test_close_all_sessions_releases_callbacks() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let callback = Arc::new(
        move |_: CK_SESSION_HANDLE,
              _: CK_NOTIFICATION,
              _: Option<&(dyn std::any::Any + Send + Sync)>|
              -> WResult<()> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    );
    pkcs11.open_session(&h, 7, CKF_SERIAL_SESSION, None, Some(callback))?;
    assert_eq!(stub::surrender(), CKR_OK);
    pkcs11.close_all_sessions(&h, 7)?;
    assert!(h.notifications().is_empty()?);
    assert_eq!(stub::surrender(), CKR_OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
#[serial]
fn test_get_attribute_value_with_unavailable_attribute() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let mut template = vec![
        Attribute::query(CKA_CLASS),
        Attribute::query(CKA_VALUE),
        Attribute::query(CKA_LABEL),
    ];
    let e = pkcs11
        .get_attribute_value(&h, stub::SESSION, 5, &mut template, CharEncoding::Utf8)
        .unwrap_err();
    assert!(matches!(
        e,
        WrapperError::AttributeUnavailable {
            index: 1,
            attribute_type: CKA_VALUE
        }
    ));
    assert_eq!(template[0].value, Value::ulong(CKO_SECRET_KEY));
    assert!(template[1].value.is_absent());
    assert_eq!(template[2].value.as_text().as_deref(), Some("stub key"));
    Ok(())
}

#[test]
#[serial]
fn test_find_objects_is_bounded() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let template = [Attribute::new(CKA_CLASS, Value::ulong(CKO_SECRET_KEY))];
    pkcs11.find_objects_init(&h, stub::SESSION, &template, CharEncoding::Utf8)?;
    assert_eq!(pkcs11.find_objects(&h, stub::SESSION, 2)?, vec![5, 6]);
    assert_eq!(pkcs11.find_objects(&h, stub::SESSION, 10)?, vec![5, 6, 7]);
    assert!(pkcs11.find_objects(&h, stub::SESSION, 0)?.is_empty());
    pkcs11.find_objects_final(&h, stub::SESSION)?;
    Ok(())
}

#[test]
#[serial]
fn test_encrypt_queries_the_size_first() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let ciphertext = pkcs11.encrypt(&h, stub::SESSION, b"plain")?;
    let expected: Vec<u8> = b"plain".iter().map(|b| b ^ 0x5A).collect();
    assert_eq!(ciphertext, expected);
    assert_eq!(stub::state().encrypt_calls, 2);
    Ok(())
}

#[test]
#[serial]
fn test_sign_starts_with_a_512_byte_buffer() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let signature = pkcs11.sign(&h, stub::SESSION, b"data")?;
    assert_eq!(signature, vec![0xAB; stub::SIGNATURE_LEN]);
    let calls = stub::state().sign_calls.clone();
    assert_eq!(calls, vec![(false, 512), (false, 600)]);
    Ok(())
}

#[test]
#[serial]
fn test_generate_key_copies_back_the_iv() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let mut mechanism = Mechanism::with_parameters(
        CKM_PBE_MD5_DES_CBC,
        MechanismParameters::Pbe(PbeParams {
            init_vector: vec![],
            password: "secret".chars().collect(),
            salt: vec![1; 8],
            iteration: 1000,
        }),
    );
    let key = pkcs11.generate_key(&h, stub::SESSION, &mut mechanism, &[], CharEncoding::Utf8)?;
    assert_eq!(key, stub::GENERATED_KEY);
    let Some(MechanismParameters::Pbe(params)) = &mechanism.parameters else {
        panic!("parameters changed shape");
    };
    assert_eq!(params.init_vector, (0x10..0x18).collect::<Vec<u8>>());
    Ok(())
}

#[test]
#[serial]
fn test_derive_key_material() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    let mut mechanism = Mechanism::with_parameters(
        CKM_SSL3_KEY_AND_MAC_DERIVE,
        MechanismParameters::Ssl3KeyMat(Ssl3KeyMatParams {
            mac_size_in_bits: 160,
            key_size_in_bits: 128,
            iv_size_in_bits: 64,
            is_export: false,
            random_info: Ssl3RandomData {
                client_random: vec![1; 32],
                server_random: vec![2; 32],
            },
            returned_key_material: Ssl3KeyMatOut::default(),
        }),
    );
    let key = pkcs11.derive_key(&h, stub::SESSION, &mut mechanism, 3, &[], CharEncoding::Utf8)?;
    assert_eq!(key, None);
    assert_eq!(stub::state().derive_key_ptr_null, Some(true));
    let Some(MechanismParameters::Ssl3KeyMat(params)) = &mechanism.parameters else {
        panic!("parameters changed shape");
    };
    assert_eq!(
        params.returned_key_material,
        Ssl3KeyMatOut {
            client_mac_secret: 11,
            server_mac_secret: 12,
            client_key: 13,
            server_key: 14,
            iv_client: vec![0xC1; 8],
            iv_server: vec![0x5E; 8],
        }
    );

    // other derivations return a key handle
    let mut mechanism = Mechanism::with_parameters(
        CKM_ECDH1_DERIVE,
        MechanismParameters::Bytes(vec![4; 65]),
    );
    let key = pkcs11.derive_key(&h, stub::SESSION, &mut mechanism, 3, &[], CharEncoding::Utf8)?;
    assert_eq!(key, Some(stub::DERIVED_KEY));
    assert_eq!(stub::state().derive_key_ptr_null, Some(false));
    Ok(())
}

#[test]
#[serial]
fn test_random_and_slot_events() -> WResult<()> {
    let (pkcs11, h) = connect_stub()?;
    assert_eq!(pkcs11.generate_random(&h, stub::SESSION, 16)?, vec![0x42; 16]);
    assert!(pkcs11.generate_random(&h, stub::SESSION, 0)?.is_empty());

    assert_eq!(pkcs11.wait_for_slot_event(&h, 0)?, 7);
    let e = pkcs11.wait_for_slot_event(&h, CKF_DONT_BLOCK).unwrap_err();
    assert_eq!(e.code(), CKR_NO_EVENT);
    Ok(())
}

#[test]
#[serial]
#[ignore = "Requires a PKCS#11 module, set PKCS11_MODULE to its path"]
fn test_softhsm2_session() -> WResult<()> {
    log_init("info,cosmian_pkcs11_wrapper=debug");
    let path = std::env::var("PKCS11_MODULE")
        .map_err(|e| WrapperError::Default(format!("PKCS11_MODULE: {e}")))?;
    let pkcs11 = Pkcs11::new(
        Box::new(crate::DynamicLoader),
        Arc::new(ThreadRuntime),
    );
    let h = pkcs11.connect(&path)?;
    pkcs11.initialize(&h, Some(&InitializeArgs::new(CKF_OS_LOCKING_OK)))?;
    let info = pkcs11.get_info(&h, CharEncoding::Utf8)?;
    tracing::info!("{info}");
    for slot in pkcs11.get_slot_list(&h, true)? {
        tracing::info!("{}", pkcs11.get_token_info(&h, slot, CharEncoding::Utf8)?);
        for mechanism in pkcs11.get_mechanism_list(&h, slot)? {
            let info = pkcs11.get_mechanism_info(&h, slot, mechanism)?;
            tracing::debug!("{}: {info}", crate::names::mechanism_label(mechanism));
        }
    }
    pkcs11.finalize(&h)?;
    pkcs11.disconnect(&h)?;
    Ok(())
}
