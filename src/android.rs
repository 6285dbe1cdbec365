//! JNI-backed activity host and the native-activity event loop.

use android_activity::{AndroidApp, MainEvent, PollEvent};
use jni::JavaVM;
use jni::objects::{JObject, JValue};
use jni::sys::jsize;

use crate::config::ShellConfig;
use crate::error::Result;
use crate::lifecycle::{ActivityHost, LifecycleLogger, QuitSlot};
use crate::permissions::PermissionHost;

// PackageManager.PERMISSION_GRANTED
const PERMISSION_GRANTED: i32 = 0;

// The android_main thread stays attached, so local refs only go away with a frame.
const LOCAL_FRAME_CAPACITY: i32 = 8;

/// Calls into the Java `NativeActivity` instance behind an [`AndroidApp`].
#[derive(Debug, Clone)]
pub struct JniHost {
    app: AndroidApp,
}

impl JniHost {
    pub fn new(app: AndroidApp) -> Self {
        Self { app }
    }

    /// Runs `f` inside a local reference frame on the calling thread's JNI env.
    fn with_activity<T>(
        &self,
        f: impl FnOnce(&mut jni::JNIEnv, &JObject) -> Result<T>,
    ) -> Result<T> {
        let vm = unsafe { JavaVM::from_raw(self.app.vm_as_ptr() as *mut _)? };
        let mut env = vm.attach_current_thread()?;
        // Global reference owned by the glue for the activity's lifetime.
        let activity = unsafe { JObject::from_raw(self.app.activity_as_ptr() as *mut _) };
        env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| f(env, &activity))
    }
}

impl PermissionHost for JniHost {
    fn is_granted(&self, permission: &str) -> Result<bool> {
        self.with_activity(|env, activity| {
            let name = env.new_string(permission)?;
            let status = env
                .call_method(
                    activity,
                    "checkSelfPermission",
                    "(Ljava/lang/String;)I",
                    &[JValue::Object(&name)],
                )?
                .i()?;
            Ok(status == PERMISSION_GRANTED)
        })
    }

    fn request_permissions(&self, permissions: &[&str], request_code: i32) -> Result<()> {
        self.with_activity(|env, activity| {
            let array =
                env.new_object_array(permissions.len() as jsize, "java/lang/String", JObject::null())?;
            for (i, permission) in permissions.iter().enumerate() {
                let name = env.new_string(permission)?;
                env.set_object_array_element(&array, i as jsize, name)?;
            }

            env.call_method(
                activity,
                "requestPermissions",
                "([Ljava/lang/String;I)V",
                &[JValue::Object(&array), JValue::Int(request_code)],
            )?;
            Ok(())
        })
    }
}

impl ActivityHost for JniHost {
    fn finish_and_remove_task(&self) -> Result<()> {
        self.with_activity(|env, activity| {
            env.call_method(activity, "finishAndRemoveTask", "()V", &[])?;
            Ok(())
        })
    }
}

static RUNNING: QuitSlot<JniHost> = QuitSlot::new();

/// Finish the running activity on behalf of native code.
pub fn request_native_finish() -> Result<()> {
    RUNNING.finish()
}

/// Drive one activity instance from creation until `Destroy`.
pub fn run(app: AndroidApp, config: &ShellConfig) {
    let host = JniHost::new(app.clone());
    let mut callbacks = config.callbacks(host.clone());

    RUNNING.register(
        host,
        LifecycleLogger::new(config.log_tag, config.activity_name, ()),
    );

    // NativeActivity delivers any saved state with the first Resume, not at creation.
    callbacks.on_create(None);

    let mut destroyed = false;
    while !destroyed {
        app.poll_events(None, |event| match event {
            PollEvent::Main(MainEvent::Destroy) => destroyed = true,
            PollEvent::Main(event) => log::trace!(target: config.log_tag, "{event:?}"),
            _ => {}
        });
    }

    RUNNING.clear();
    callbacks.on_destroy();
}
